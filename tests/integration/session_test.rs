//! Session lifecycle tests: single-active-session, revocation,
//! expiry, and action parsing.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn second_login_revokes_first_session() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let acme = app.create_tenant("acme", Some("acme")).await;
    app.create_user("tech@acme.pt", "hunter2", "technician", Some(acme))
        .await;

    let first = app
        .login_on("acme.example.com", "tech@acme.pt", "hunter2")
        .await;
    let second = app
        .login_on("acme.example.com", "tech@acme.pt", "hunter2")
        .await;
    assert_ne!(first, second);

    // The old token is rejected and the stored row carries the reason.
    let response = app
        .request(
            "POST",
            "/api/session",
            Some("acme.example.com"),
            Some(json!({ "action": "validate" })),
            Some(&first),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"].as_str(), Some("SESSION_REVOKED"));
    assert!(
        response.body["message"]
            .as_str()
            .unwrap_or_default()
            .contains("new login"),
        "{:?}",
        response.body
    );

    let reason: Option<String> = sqlx::query_scalar(
        "SELECT revoked_reason FROM sessions WHERE token_hash = $1",
    )
    .bind(servia_auth::token::digest(&first))
    .fetch_one(&app.db_pool)
    .await
    .expect("session row");
    assert_eq!(reason.as_deref(), Some("new login"));

    // The new token still works.
    let response = app
        .request(
            "POST",
            "/api/session",
            Some("acme.example.com"),
            Some(json!({ "action": "validate" })),
            Some(&second),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn revoke_is_idempotent() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let acme = app.create_tenant("acme", Some("acme")).await;
    app.create_user("tech@acme.pt", "hunter2", "technician", Some(acme))
        .await;
    let token = app
        .login_on("acme.example.com", "tech@acme.pt", "hunter2")
        .await;

    for _ in 0..2 {
        let response = app
            .request(
                "POST",
                "/api/session",
                Some("acme.example.com"),
                Some(json!({ "action": "revoke", "reason": "logout" })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        assert_eq!(response.body["success"].as_bool(), Some(true));
    }
}

#[tokio::test]
async fn validate_reports_server_time_and_expiry() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let acme = app.create_tenant("acme", Some("acme")).await;
    app.create_user("tech@acme.pt", "hunter2", "technician", Some(acme))
        .await;
    let token = app
        .login_on("acme.example.com", "tech@acme.pt", "hunter2")
        .await;

    let response = app
        .request(
            "POST",
            "/api/session",
            Some("acme.example.com"),
            Some(json!({ "action": "validate" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["serverNow"].is_string());
    assert!(response.body["session"]["expiresAt"].is_string());
}

#[tokio::test]
async fn expired_session_is_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let acme = app.create_tenant("acme", Some("acme")).await;
    app.create_user("tech@acme.pt", "hunter2", "technician", Some(acme))
        .await;
    let token = app
        .login_on("acme.example.com", "tech@acme.pt", "hunter2")
        .await;

    sqlx::query("UPDATE sessions SET expires_at = NOW() - INTERVAL '1 minute' WHERE token_hash = $1")
        .bind(servia_auth::token::digest(&token))
        .execute(&app.db_pool)
        .await
        .expect("expire session");

    let response = app
        .request(
            "POST",
            "/api/session",
            Some("acme.example.com"),
            Some(json!({ "action": "validate" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"].as_str(), Some("SESSION_EXPIRED"));
}

#[tokio::test]
async fn cleanup_deletes_only_long_dead_sessions() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let acme = app.create_tenant("acme", Some("acme")).await;
    app.create_user("tech@acme.pt", "hunter2", "technician", Some(acme))
        .await;

    let stale = app
        .login_on("acme.example.com", "tech@acme.pt", "hunter2")
        .await;
    sqlx::query("UPDATE sessions SET expires_at = NOW() - INTERVAL '2 days'")
        .execute(&app.db_pool)
        .await
        .expect("Failed to backdate session");

    // Superseding login leaves a revoked-yesterday row and a live one.
    let live = app
        .login_on("acme.example.com", "tech@acme.pt", "hunter2")
        .await;
    assert_ne!(stale, live);

    let repo = servia_database::repositories::session::SessionRepository::new(app.db_pool.clone());
    let pruned = repo
        .cleanup_expired(chrono::Utc::now() - chrono::Duration::days(1))
        .await
        .expect("Cleanup failed");
    assert_eq!(pruned, 1);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to count sessions");
    assert_eq!(remaining, 1);
}

#[tokio::test]
async fn missing_token_is_a_bad_request() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/session",
            Some("acme.example.com"),
            Some(json!({ "action": "validate" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"].as_str(), Some("MALFORMED_REQUEST"));
}

#[tokio::test]
async fn unknown_action_is_a_bad_request() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/session",
            Some("acme.example.com"),
            Some(json!({ "action": "impersonate", "token": "whatever" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"].as_str(), Some("MALFORMED_REQUEST"));
}
