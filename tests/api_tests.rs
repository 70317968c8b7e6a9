use gps_tracker_nav::{
    AppConfig, AppState, create_router,
    models::{NavigationResponse, OutcomeKind},
    routes::RouteName,
};
use reqwest::{StatusCode, header, redirect::Policy};
use tokio::net::TcpListener;

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

async fn spawn_app() -> TestApp {
    let state = AppState::new(AppConfig::default()).expect("standard route table");
    let router = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    // Redirects are asserted on, not followed.
    let client = reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .unwrap();

    TestApp { address, client }
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;
    let response = app
        .client
        .get(&format!("{}/health", app.address))
        .send()
        .await
        .expect("req fail");
    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_login_then_logout_flow() {
    let app = spawn_app().await;

    // Anonymous visitor opening the dashboard is sent to the login page.
    let resp = app
        .client
        .get(&format!("{}/", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/login");

    // The login page itself is reachable.
    let resp = app
        .client
        .get(&format!("{}/login", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: NavigationResponse = resp.json().await.unwrap();
    assert_eq!(body.route, Some(RouteName::Login));

    // With a token the login page bounces to Home, and Home is served.
    let resp = app
        .client
        .get(&format!("{}/login", app.address))
        .header(header::COOKIE, "token=issued-by-auth-api")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/");

    let resp = app
        .client
        .get(&format!("{}/", app.address))
        .header(header::COOKIE, "token=issued-by-auth-api")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: NavigationResponse = resp.json().await.unwrap();
    assert_eq!(body.route, Some(RouteName::Home));

    // Dropping the token makes protected views unreachable again.
    let resp = app
        .client
        .get(&format!("{}/account", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_navigate_endpoint_never_redirects() {
    let app = spawn_app().await;

    let resp = app
        .client
        .get(&format!("{}/api/navigate", app.address))
        .query(&[("path", "/vehicle/42")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: NavigationResponse = resp.json().await.unwrap();
    assert_eq!(body.outcome, OutcomeKind::Redirect);
    assert_eq!(body.route, Some(RouteName::Login));

    let resp = app
        .client
        .get(&format!("{}/api/navigate", app.address))
        .query(&[("path", "/vehicle/42")])
        .bearer_auth("issued-by-auth-api")
        .send()
        .await
        .unwrap();
    let body: NavigationResponse = resp.json().await.unwrap();
    assert_eq!(body.outcome, OutcomeKind::Proceed);
    assert_eq!(body.route, Some(RouteName::VehicleDetail));
    assert_eq!(body.params.get("id").map(String::as_str), Some("42"));
}

#[tokio::test]
async fn test_navigate_endpoint_requires_path() {
    let app = spawn_app().await;

    let resp = app
        .client
        .get(&format!("{}/api/navigate", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = spawn_app().await;

    let resp = app
        .client
        .get(&format!("{}/api-docs/openapi.json", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let doc: serde_json::Value = resp.json().await.unwrap();
    assert!(doc["paths"]["/api/navigate"].is_object());
}
