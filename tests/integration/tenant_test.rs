//! Tenant switching, authorization predicates, and profile editing.

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::{self, TestApp};

#[tokio::test]
async fn super_user_switch_is_applied_and_audited() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let acme = app.create_tenant("acme", Some("acme")).await;
    let globex = app.create_tenant("globex", Some("globex")).await;
    let user_id = app
        .create_user("root@servia.pt", "hunter2", "super_user", Some(acme))
        .await;
    let token = app
        .login_on("acme.example.com", "root@servia.pt", "hunter2")
        .await;

    let response = app
        .request(
            "POST",
            "/api/session",
            Some("acme.example.com"),
            Some(json!({
                "action": "switch_tenant",
                "tenantId": globex,
                "reason": "support case 4711",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(
        response.body["tenant"]["id"].as_str(),
        Some(globex.to_string().as_str())
    );

    let active: Uuid = sqlx::query_scalar(
        "SELECT active_tenant_id FROM sessions WHERE token_hash = $1",
    )
    .bind(servia_auth::token::digest(&token))
    .fetch_one(&app.db_pool)
    .await
    .expect("session row");
    assert_eq!(active, globex);

    let audit_repo =
        servia_database::repositories::audit::AuditLogRepository::new(app.db_pool.clone());
    let entries = audit_repo.find_by_actor(user_id).await.expect("audit rows");
    let entry = entries.first().expect("audit row");
    assert_eq!(entry.action, "tenant.switch");
    assert!(entry.success);
    assert_eq!(entry.target_tenant_id, Some(globex));
}

#[tokio::test]
async fn denied_switch_is_audited_and_leaves_session_alone() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let acme = app.create_tenant("acme", Some("acme")).await;
    let globex = app.create_tenant("globex", Some("globex")).await;
    let user_id = app
        .create_user("root@servia.pt", "hunter2", "super_user", Some(acme))
        .await;
    let token = app
        .login_on("acme.example.com", "root@servia.pt", "hunter2")
        .await;

    // Replace the predicate with a deny-all policy for this test.
    sqlx::query(
        r#"CREATE OR REPLACE FUNCTION can_access_tenant(p_user_id UUID, p_tenant_id UUID)
           RETURNS BOOLEAN LANGUAGE sql STABLE AS $$ SELECT FALSE; $$"#,
    )
    .execute(&app.db_pool)
    .await
    .expect("replace predicate");

    let response = app
        .request(
            "POST",
            "/api/session",
            Some("acme.example.com"),
            Some(json!({ "action": "switch_tenant", "tenantId": globex })),
            Some(&token),
        )
        .await;

    helpers::install_default_predicates(&app.db_pool).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN, "{:?}", response.body);
    assert_eq!(
        response.body["error"].as_str(),
        Some("TENANT_ACCESS_DENIED")
    );

    let active: Uuid = sqlx::query_scalar(
        "SELECT active_tenant_id FROM sessions WHERE token_hash = $1",
    )
    .bind(servia_auth::token::digest(&token))
    .fetch_one(&app.db_pool)
    .await
    .expect("session row");
    assert_eq!(active, acme);

    let rows: Vec<(bool,)> = sqlx::query_as(
        "SELECT success FROM audit_log WHERE actor_user_id = $1 AND action = 'tenant.switch'",
    )
    .bind(user_id)
    .fetch_all(&app.db_pool)
    .await
    .expect("audit rows");
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].0);
}

#[tokio::test]
async fn ordinary_user_cannot_switch() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let acme = app.create_tenant("acme", Some("acme")).await;
    let globex = app.create_tenant("globex", Some("globex")).await;
    app.create_user("admin@acme.pt", "hunter2", "admin", Some(acme))
        .await;
    let token = app
        .login_on("acme.example.com", "admin@acme.pt", "hunter2")
        .await;

    let response = app
        .request(
            "POST",
            "/api/session",
            Some("acme.example.com"),
            Some(json!({ "action": "switch_tenant", "tenantId": globex })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.body["error"].as_str(),
        Some("TENANT_ACCESS_DENIED")
    );
}

#[tokio::test]
async fn technician_cannot_manage_tenant() {
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
            "/api/tenants",
            Some("acme.example.com"),
            Some(json!({ "action": "get_profile" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.body["error"].as_str(),
        Some("TENANT_ACCESS_DENIED")
    );
}

#[tokio::test]
async fn admin_updates_own_tenant_profile() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let acme = app.create_tenant("acme", Some("acme")).await;
    let admin = app
        .create_user("admin@acme.pt", "hunter2", "admin", Some(acme))
        .await;
    let token = app
        .login_on("acme.example.com", "admin@acme.pt", "hunter2")
        .await;

    let response = app
        .request(
            "POST",
            "/api/tenants",
            Some("acme.example.com"),
            Some(json!({
                "action": "update_profile",
                "data": {
                    "name": "Acme Serviços",
                    "contact_email": "hello@acme.pt",
                    "postal_code": "4000-123",
                },
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(
        response.body["tenant"]["name"].as_str(),
        Some("Acme Serviços")
    );

    let (name, updated_by): (String, Option<Uuid>) = sqlx::query_as(
        "SELECT name, updated_by FROM tenants WHERE id = $1",
    )
    .bind(acme)
    .fetch_one(&app.db_pool)
    .await
    .expect("tenant row");
    assert_eq!(name, "Acme Serviços");
    assert_eq!(updated_by, Some(admin));
}

#[tokio::test]
async fn invalid_postal_code_is_rejected_without_write() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let acme = app.create_tenant("acme", Some("acme")).await;
    app.create_user("admin@acme.pt", "hunter2", "admin", Some(acme))
        .await;
    let token = app
        .login_on("acme.example.com", "admin@acme.pt", "hunter2")
        .await;

    let response = app
        .request(
            "POST",
            "/api/tenants",
            Some("acme.example.com"),
            Some(json!({
                "action": "update_profile",
                "data": { "name": "Acme", "postal_code": "40001-23" },
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"].as_str(), Some("VALIDATION"));

    let name: String = sqlx::query_scalar("SELECT name FROM tenants WHERE id = $1")
        .bind(acme)
        .fetch_one(&app.db_pool)
        .await
        .expect("tenant row");
    assert_eq!(name, "acme Lda");
}

#[tokio::test]
async fn missing_edit_predicate_fails_open_for_super_user() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let acme = app.create_tenant("acme", Some("acme")).await;
    let globex = app.create_tenant("globex", Some("globex")).await;
    app.create_user("root@servia.pt", "hunter2", "super_user", Some(acme))
        .await;
    let token = app
        .login_on("acme.example.com", "root@servia.pt", "hunter2")
        .await;

    // A deployment without the edit predicate installed at all.
    sqlx::query("DROP FUNCTION IF EXISTS can_edit_tenant(UUID, UUID)")
        .execute(&app.db_pool)
        .await
        .expect("Failed to drop predicate");

    let response = app
        .request(
            "POST",
            "/api/tenants",
            Some("acme.example.com"),
            Some(json!({
                "action": "update_profile",
                "tenantId": globex,
                "data": { "name": "Globex Portugal" },
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let name: String = sqlx::query_scalar("SELECT name FROM tenants WHERE id = $1")
        .bind(globex)
        .fetch_one(&app.db_pool)
        .await
        .expect("tenant row");
    assert_eq!(name, "Globex Portugal");

    helpers::install_default_predicates(&app.db_pool).await;
}

#[tokio::test]
async fn edit_predicate_error_fails_closed() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let acme = app.create_tenant("acme", Some("acme")).await;
    let globex = app.create_tenant("globex", Some("globex")).await;
    app.create_user("root@servia.pt", "hunter2", "super_user", Some(acme))
        .await;
    let token = app
        .login_on("acme.example.com", "root@servia.pt", "hunter2")
        .await;

    // The predicate exists but errors; only a missing predicate may
    // fail open.
    sqlx::query(
        r#"CREATE OR REPLACE FUNCTION can_edit_tenant(p_user_id UUID, p_tenant_id UUID)
           RETURNS BOOLEAN LANGUAGE plpgsql STABLE AS $$
           BEGIN
               RAISE EXCEPTION 'authorization backend unavailable';
           END
           $$"#,
    )
    .execute(&app.db_pool)
    .await
    .expect("Failed to replace predicate");

    let response = app
        .request(
            "POST",
            "/api/tenants",
            Some("acme.example.com"),
            Some(json!({
                "action": "update_profile",
                "tenantId": globex,
                "data": { "name": "Globex Portugal" },
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body["error"].as_str(),
        Some("AUTHORIZATION_CHECK_FAILED")
    );

    let name: String = sqlx::query_scalar("SELECT name FROM tenants WHERE id = $1")
        .bind(globex)
        .fetch_one(&app.db_pool)
        .await
        .expect("tenant row");
    assert_eq!(name, "globex Lda");

    helpers::install_default_predicates(&app.db_pool).await;
}
