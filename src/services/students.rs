//! Student provisioning.
//!
//! Enrolling a student who has no user account yet creates one with a
//! derived email and a configured default password, then links it. Both
//! the single-student endpoint and the roster import go through here.

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::config::Config;
use crate::db::{students as db_students, users as db_users};
use crate::error::{AppError, AppResult};
use crate::models::{Role, Student};
use crate::services::auth;

/// Enroll a student and auto-provision a linked user account.
pub async fn create_with_account(
    db: &DatabaseConnection,
    config: &Config,
    name: &str,
    class_name: &str,
    password: &str,
) -> AppResult<Student> {
    if db_students::find_by_name_and_class(db, name, class_name)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "Student '{}' is already enrolled in class {}",
            name, class_name
        )));
    }

    let email = auth::derive_student_email(name, class_name, &config.student_email_domain);
    if db_users::find_by_email(db, &email).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "The email '{}' is already registered",
            email
        )));
    }

    let password_hash = auth::hash_password(password)?;
    let user = db_users::insert(db, name, &email, Role::Student, &password_hash).await?;
    let student = db_students::insert(db, Some(user.id), name, class_name).await?;

    info!("Enrolled student '{}' in class {}", name, class_name);

    Ok(student)
}

/// Enroll a student linked to an existing user account.
pub async fn create_linked(
    db: &DatabaseConnection,
    name: &str,
    class_name: &str,
    user_id: uuid::Uuid,
) -> AppResult<Student> {
    if db_students::find_by_name_and_class(db, name, class_name)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "Student '{}' is already enrolled in class {}",
            name, class_name
        )));
    }

    db_students::insert(db, Some(user_id), name, class_name).await
}
