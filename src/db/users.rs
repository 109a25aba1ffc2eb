//! Database operations for user accounts.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Role, User};

/// Insert a new user with an already-hashed password.
pub async fn insert(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    role: Role,
    password_hash: &str,
) -> AppResult<User> {
    let model = crate::entity::user::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        role: Set(role.as_str().to_string()),
        password_hash: Set(password_hash.to_string()),
        created_at: Set(Utc::now()),
    };

    let inserted = model.insert(db).await?;

    Ok(inserted.into())
}

/// Find a user by id. Returns the raw row including the password hash.
pub async fn find_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> AppResult<Option<crate::entity::user::Model>> {
    let result = crate::entity::user::Entity::find_by_id(id).one(db).await?;

    Ok(result)
}

/// Find a user by exact name.
pub async fn find_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> AppResult<Option<crate::entity::user::Model>> {
    let result = crate::entity::user::Entity::find()
        .filter(crate::entity::user::Column::Name.eq(name))
        .one(db)
        .await?;

    Ok(result)
}

/// Find a user by exact email.
pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> AppResult<Option<crate::entity::user::Model>> {
    let result = crate::entity::user::Entity::find()
        .filter(crate::entity::user::Column::Email.eq(email))
        .one(db)
        .await?;

    Ok(result)
}

/// Resolve a login identifier: exact name match first, then exact email.
pub async fn find_by_login(
    db: &DatabaseConnection,
    username: &str,
) -> AppResult<Option<crate::entity::user::Model>> {
    if let Some(user) = find_by_name(db, username).await? {
        return Ok(Some(user));
    }
    find_by_email(db, username).await
}
