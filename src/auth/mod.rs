//! Bearer token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying {subject = user id, role}. Validity is a
//! fixed window from issuance (24 hours by default); there is no refresh or
//! revocation, so a deleted user's outstanding tokens stay syntactically
//! valid until expiry and are caught by the per-request user lookup.

mod extractor;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Claims, Role};

pub use extractor::AuthUser;

/// Create a signed access token for a user.
pub fn create_token(
    user_id: Uuid,
    role: Role,
    secret: &SecretString,
    ttl_hours: i64,
) -> AppResult<String> {
    let now = Utc::now();
    let exp = now + chrono::Duration::hours(ttl_hours);

    let claims = Claims {
        sub: user_id.to_string(),
        role,
        exp: exp.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let key = EncodingKey::from_secret(secret.expose_secret().as_bytes());
    encode(&Header::default(), &claims, &key)
        .map_err(|e| AppError::Unauthorized(format!("Failed to create access token: {}", e)))
}

/// Verify a token's signature and expiry, returning its claims.
///
/// Expired and otherwise-invalid tokens are distinguished so clients can
/// prompt for a fresh login instead of showing a generic failure.
pub fn verify_token(token: &str, secret: &SecretString) -> AppResult<Claims> {
    let key = DecodingKey::from_secret(secret.expose_secret().as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    match decode::<Claims>(token, &key, &validation) {
        Ok(data) => Ok(data.claims),
        Err(e) => match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                Err(AppError::Unauthorized("Token expired".to_string()))
            }
            _ => Err(AppError::Unauthorized("Invalid token".to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("unit-test-secret")
    }

    #[test]
    fn test_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = create_token(user_id, Role::Teacher, &secret(), 24).unwrap();

        let claims = verify_token(&token, &secret()).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, Role::Teacher);
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = create_token(Uuid::new_v4(), Role::Student, &secret(), -1).unwrap();

        match verify_token(&token, &secret()) {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Token expired"),
            other => panic!("expected expired-token error, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(Uuid::new_v4(), Role::Admin, &secret(), 24).unwrap();

        match verify_token(&token, &SecretString::from("other-secret")) {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Invalid token"),
            other => panic!("expected invalid-token error, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(verify_token("not-a-jwt", &secret()).is_err());
    }
}
