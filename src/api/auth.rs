//! Authentication endpoints.

use actix_web::{HttpResponse, get, post, web};

use crate::auth::AuthUser;
use crate::config::Config;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{LoginRequest, RegisterRequest};
use crate::services::auth as auth_service;

/// Configure auth routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register).service(login).service(me);
}

/// Register a new user and issue a bearer token.
///
/// POST /auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = crate::models::TokenResponse),
        (status = 400, description = "Validation failure or duplicate account", body = crate::error::ErrorResponse)
    )
)]
#[post("/auth/register")]
pub async fn register(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let token =
        auth_service::register(pool.connection(), config.get_ref(), body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(token))
}

/// Authenticate with name or email and issue a bearer token.
///
/// POST /auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = crate::models::TokenResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    )
)]
#[post("/auth/login")]
pub async fn login(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let token = auth_service::login(pool.connection(), config.get_ref(), body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(token))
}

/// Get the authenticated user.
///
/// GET /auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Current user", body = crate::models::User),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[get("/auth/me")]
pub async fn me(auth: AuthUser) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(auth.user))
}
