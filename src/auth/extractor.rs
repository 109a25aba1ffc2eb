//! Actix-web extractor for bearer token authentication.
//!
//! Handlers take an `AuthUser` argument to require a valid token; role
//! checks happen in the handler via `require_staff`/`require_admin` so the
//! authorization rule sits next to the operation it guards.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use crate::config::Config;
use crate::db::{DbPool, users};
use crate::error::{AppError, AppResult};
use crate::models::User;

/// The authenticated user resolved from the Authorization header.
///
/// Verification is pure: signature and expiry are checked, then the subject
/// is looked up by id so tokens for since-deleted users are rejected.
pub struct AuthUser {
    pub user: User,
}

impl AuthUser {
    /// Require an admin or teacher role.
    pub fn require_staff(&self) -> AppResult<()> {
        if self.user.role.is_staff() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "You are not allowed to perform this action".to_string(),
            ))
        }
    }

    /// Require the admin role.
    pub fn require_admin(&self) -> AppResult<()> {
        if self.user.role == crate::models::Role::Admin {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "You are not allowed to perform this action".to_string(),
            ))
        }
    }
}

/// Extract the raw token from an `Authorization: Bearer <token>` header.
fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let pool = req
                .app_data::<web::Data<DbPool>>()
                .cloned()
                .ok_or_else(|| AppError::Unauthorized("Internal configuration error".to_string()))?;
            let config = req
                .app_data::<web::Data<Config>>()
                .cloned()
                .ok_or_else(|| AppError::Unauthorized("Internal configuration error".to_string()))?;

            let token = bearer_token(&req).ok_or_else(|| {
                AppError::Unauthorized("Missing bearer token. Provide an Authorization header.".to_string())
            })?;

            let claims = crate::auth::verify_token(&token, &config.jwt_secret)?;

            let user_id = Uuid::parse_str(&claims.sub)
                .map_err(|_| AppError::Unauthorized("Invalid token".to_string()))?;

            let user = users::find_by_id(pool.connection(), user_id)
                .await?
                .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

            Ok(AuthUser { user: user.into() })
        })
    }
}
