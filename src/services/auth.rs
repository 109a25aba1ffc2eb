//! Registration and login flows.

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::auth;
use crate::config::Config;
use crate::db::{students as db_students, users as db_users};
use crate::error::{AppError, AppResult};
use crate::models::{LoginRequest, RegisterRequest, Role, TokenResponse, User};

/// Deterministic transform of free text into an email-safe token:
/// lowercase, spaces and slashes replaced with underscores.
pub fn slugify(s: &str) -> String {
    s.trim().to_lowercase().replace([' ', '/'], "_")
}

/// Derive the email for a student account that was created without one.
pub fn derive_student_email(name: &str, class_name: &str, domain: &str) -> String {
    format!("{}_{}@{}", slugify(name), slugify(class_name), domain)
}

/// Hash a password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Validation(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a stored hash. An unparseable hash counts as
/// a mismatch rather than an error.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Register a new user, enforcing the role-specific rules.
///
/// Staff must supply an email. Students without one get a derived address,
/// and their duplicate check runs against the (name, class) enrollment pair
/// instead of the global user name.
pub async fn register(
    db: &DatabaseConnection,
    config: &Config,
    req: RegisterRequest,
) -> AppResult<TokenResponse> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let class_name = req
        .class_name
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let email = match req.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        Some(email) => email.to_string(),
        None if req.role == Role::Student => derive_student_email(
            &name,
            class_name.unwrap_or_default(),
            &config.student_email_domain,
        ),
        None => {
            return Err(AppError::Validation(
                "Email is required for staff accounts".to_string(),
            ));
        }
    };

    // Duplicate detection: students registering into a class are checked
    // against the enrollment pair, everyone else against the user name.
    if req.role == Role::Student && class_name.is_some() {
        let class_name = class_name.unwrap_or_default();
        if db_students::find_by_name_and_class(db, &name, class_name)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Student '{}' is already enrolled in class {}",
                name, class_name
            )));
        }
    } else if db_users::find_by_name(db, &name).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "The name '{}' is already registered",
            name
        )));
    }

    if db_users::find_by_email(db, &email).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "The email '{}' is already registered",
            email
        )));
    }

    let password_hash = hash_password(&req.password)?;
    let user = db_users::insert(db, &name, &email, req.role, &password_hash).await?;

    if req.role == Role::Student {
        db_students::insert(db, Some(user.id), &name, class_name.unwrap_or_default()).await?;
    }

    info!("Registered {} account for '{}'", req.role, user.name);

    let token = auth::create_token(user.id, req.role, &config.jwt_secret, config.token_ttl_hours)?;

    Ok(TokenResponse::bearer(token, user))
}

/// Authenticate a user by name or email and issue a token.
///
/// All failure paths return the same message so the response does not leak
/// whether the account exists.
pub async fn login(
    db: &DatabaseConnection,
    config: &Config,
    req: LoginRequest,
) -> AppResult<TokenResponse> {
    let invalid = || AppError::Unauthorized("Invalid username or password".to_string());

    let user = db_users::find_by_login(db, req.username.trim())
        .await?
        .ok_or_else(invalid)?;

    let role = Role::parse(&user.role).unwrap_or_default();

    // Students logging in through a class picker must match their
    // enrollment exactly.
    if role == Role::Student {
        if let Some(class_name) = req.class_name.as_deref().map(str::trim).filter(|c| !c.is_empty())
        {
            let student = db_students::find_by_user(db, user.id).await?;
            match student {
                Some(s) if s.class_name == class_name => {}
                _ => return Err(invalid()),
            }
        }
    }

    if !verify_password(&req.password, &user.password_hash) {
        return Err(invalid());
    }

    let user: User = user.into();
    let token = auth::create_token(user.id, role, &config.jwt_secret, config.token_ttl_hours)?;

    info!("Login for {} '{}'", role, user.name);

    Ok(TokenResponse::bearer(token, user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Nora Ahmed"), "nora_ahmed");
        assert_eq!(slugify("  Grade 1/A  "), "grade_1_a");
        assert_eq!(slugify("plain"), "plain");
    }

    #[test]
    fn test_derive_student_email() {
        assert_eq!(
            derive_student_email("Nora Ahmed", "1/A", "students.example.org"),
            "nora_ahmed_1_a@students.example.org"
        );
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("secret123").unwrap();
        assert!(verify_password("secret123", &hash));
        assert!(!verify_password("secret124", &hash));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(!verify_password("secret123", "not-a-phc-string"));
    }
}
