//! Integration tests for the error-to-HTTP status mapping.

use actix_web::ResponseError;
use actix_web::http::StatusCode;

use meritboard_lib::error::AppError;

#[test]
fn test_validation_maps_to_400() {
    let err = AppError::Validation("points out of range".to_string());
    assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_conflict_maps_to_400() {
    let err = AppError::Conflict("duplicate enrollment".to_string());
    assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_unauthorized_maps_to_401() {
    let err = AppError::Unauthorized("Token expired".to_string());
    assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn test_forbidden_maps_to_403() {
    let err = AppError::Forbidden("staff only".to_string());
    assert_eq!(err.error_response().status(), StatusCode::FORBIDDEN);
}

#[test]
fn test_not_found_maps_to_404() {
    let err = AppError::NotFound("Student".to_string());
    assert_eq!(err.error_response().status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_database_maps_to_500() {
    let err = AppError::Database("connection reset".to_string());
    assert_eq!(
        err.error_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_not_found_message_names_the_entity() {
    let err = AppError::NotFound("Behavior record".to_string());
    assert_eq!(err.to_string(), "Behavior record not found");
}
