//! Integration tests for the health endpoint wiring.

use actix_web::{App, test};

use meritboard_lib::api;

#[actix_web::test]
async fn test_health_returns_200() {
    let app = test::init_service(App::new().service(api::health::health)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[actix_web::test]
async fn test_unknown_route_returns_404() {
    let app = test::init_service(App::new().service(api::health::health)).await;

    let req = test::TestRequest::get().uri("/nope").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 404);
}
