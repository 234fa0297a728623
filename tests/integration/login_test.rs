//! Login and tenant resolution tests.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn custom_domain_beats_subdomain() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    // Host acme.example.com would resolve tenant "acme" by subdomain,
    // but a custom-domain row points the same host at another tenant.
    let acme = app.create_tenant("acme", Some("acme")).await;
    let globex = app.create_tenant("globex", None).await;
    app.create_domain("acme.example.com", globex).await;

    app.create_user("admin@globex.pt", "hunter2", "admin", Some(globex))
        .await;

    let body = json!({ "email": "admin@globex.pt", "password": "hunter2" });
    let response = app
        .request("POST", "/api/login", Some("acme.example.com"), Some(body), None)
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(
        response.body["tenant"]["id"].as_str(),
        Some(globex.to_string().as_str())
    );
    assert_ne!(
        response.body["tenant"]["id"].as_str(),
        Some(acme.to_string().as_str())
    );
}

#[tokio::test]
async fn subdomain_resolves_when_no_domain_row() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let acme = app.create_tenant("acme", Some("acme")).await;
    app.create_user("tech@acme.pt", "hunter2", "technician", Some(acme))
        .await;

    let token = app
        .login_on("acme.example.com", "tech@acme.pt", "hunter2")
        .await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn cross_tenant_login_is_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let acme = app.create_tenant("acme", Some("acme")).await;
    app.create_tenant("globex", Some("globex")).await;
    app.create_user("tech@acme.pt", "hunter2", "technician", Some(acme))
        .await;

    let body = json!({ "email": "tech@acme.pt", "password": "hunter2" });
    let response = app
        .request(
            "POST",
            "/api/login",
            Some("globex.example.com"),
            Some(body),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"].as_str(), Some("TENANT_MISMATCH"));
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let acme = app.create_tenant("acme", Some("acme")).await;
    app.create_user("tech@acme.pt", "hunter2", "technician", Some(acme))
        .await;

    let body = json!({ "email": "tech@acme.pt", "password": "wrong" });
    let response = app
        .request(
            "POST",
            "/api/login",
            Some("acme.example.com"),
            Some(body),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.body["error"].as_str(),
        Some("INVALID_CREDENTIALS")
    );
}

#[tokio::test]
async fn www_host_falls_back_to_own_tenant() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    // "www" never resolves a tenant; the user's own tenant is used as
    // a fallback instead.
    let acme = app.create_tenant("acme", Some("acme")).await;
    app.create_user("tech@acme.pt", "hunter2", "technician", Some(acme))
        .await;

    let body = json!({ "email": "tech@acme.pt", "password": "hunter2" });
    let response = app
        .request(
            "POST",
            "/api/login",
            Some("www.example.com"),
            Some(body),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(
        response.body["tenant"]["id"].as_str(),
        Some(acme.to_string().as_str())
    );
}

#[tokio::test]
async fn login_validate_revoke_flow() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let acme = app.create_tenant("acme", Some("acme")).await;
    app.create_user("admin@acme.pt", "hunter2", "admin", Some(acme))
        .await;

    let token = app
        .login_on("acme.example.com", "admin@acme.pt", "hunter2")
        .await;

    // Validate on the same host.
    let response = app
        .request(
            "POST",
            "/api/session",
            Some("acme.example.com"),
            Some(json!({ "action": "validate" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(
        response.body["tenant"]["id"].as_str(),
        Some(acme.to_string().as_str())
    );
    assert!(response.body["serverNow"].is_string());

    // Revoke, then the token no longer validates.
    let response = app
        .request(
            "POST",
            "/api/session",
            Some("acme.example.com"),
            Some(json!({ "action": "revoke" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

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
    assert_eq!(response.body["error"].as_str(), Some("SESSION_REVOKED"));
}
