//! Technical report client-link tests.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn client_link_is_minted_once() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let acme = app.create_tenant("acme", Some("acme")).await;
    let tech = app
        .create_user("tech@acme.pt", "hunter2", "technician", Some(acme))
        .await;
    let report = app.create_report(acme, tech, "Boiler inspection").await;
    let token = app
        .login_on("acme.example.com", "tech@acme.pt", "hunter2")
        .await;

    let path = format!("/api/technical-reports/{report}/client-link");
    let first = app
        .request("POST", &path, Some("acme.example.com"), None, Some(&token))
        .await;
    assert_eq!(first.status, StatusCode::OK, "{:?}", first.body);
    let minted = first.body["client_token"]
        .as_str()
        .expect("client token")
        .to_string();
    assert!(!minted.is_empty());

    // A second request returns the stored token, never a new one.
    let second = app
        .request("POST", &path, Some("acme.example.com"), None, Some(&token))
        .await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["client_token"].as_str(), Some(minted.as_str()));

    let stored: Option<String> =
        sqlx::query_scalar("SELECT client_token FROM technical_reports WHERE id = $1")
            .bind(report)
            .fetch_one(&app.db_pool)
            .await
            .expect("report row");
    assert_eq!(stored.as_deref(), Some(minted.as_str()));
}

#[tokio::test]
async fn cross_tenant_report_is_denied() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let acme = app.create_tenant("acme", Some("acme")).await;
    let globex = app.create_tenant("globex", Some("globex")).await;
    let owner = app
        .create_user("tech@globex.pt", "hunter2", "technician", Some(globex))
        .await;
    let report = app.create_report(globex, owner, "Pump maintenance").await;

    app.create_user("tech@acme.pt", "hunter2", "technician", Some(acme))
        .await;
    let token = app
        .login_on("acme.example.com", "tech@acme.pt", "hunter2")
        .await;

    let response = app
        .request(
            "POST",
            &format!("/api/technical-reports/{report}/client-link"),
            Some("acme.example.com"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"].as_str(), Some("TENANT_MISMATCH"));
}
