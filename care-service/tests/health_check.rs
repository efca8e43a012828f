mod common;

use common::{spawn_router, TestApp};

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").await;
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Server is Running");
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["service"], "care-service");

    app.cleanup().await;
}

#[tokio::test]
async fn readiness_check_works() {
    let app = TestApp::spawn().await;

    let response = app.get("/ready").await;
    assert!(response.status().is_success());

    app.cleanup().await;
}

#[tokio::test]
async fn root_returns_welcome_envelope() {
    let address = spawn_router(None).await;

    let body: serde_json::Value = reqwest::get(&address)
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");

    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Welcome to the Care Portal API");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn unknown_route_returns_404_envelope() {
    let address = spawn_router(None).await;

    let response = reqwest::get(format!("{}/does-not-exist", address))
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Route not found");
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let address = spawn_router(None).await;

    let response = reqwest::Client::new()
        .get(&address)
        .header("x-request-id", "trace-me-42")
        .send()
        .await
        .expect("Failed to execute request");

    let headers = response.headers();
    assert_eq!(headers["x-request-id"], "trace-me-42");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let address = spawn_router(None).await;

    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{}/review", address))
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}
