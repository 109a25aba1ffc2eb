//! Database operations for students.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::Student;

/// Insert a new student with a zero point total.
pub async fn insert(
    db: &DatabaseConnection,
    user_id: Option<Uuid>,
    name: &str,
    class_name: &str,
) -> AppResult<Student> {
    let model = crate::entity::student::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        name: Set(name.to_string()),
        class_name: Set(class_name.to_string()),
        total_points: Set(0),
        created_at: Set(Utc::now()),
    };

    let inserted = model.insert(db).await?;

    Ok(inserted.into())
}

/// Find a student by id.
pub async fn find_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> AppResult<Option<crate::entity::student::Model>> {
    let result = crate::entity::student::Entity::find_by_id(id)
        .one(db)
        .await?;

    Ok(result)
}

/// Find a student by linked user account.
pub async fn find_by_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> AppResult<Option<crate::entity::student::Model>> {
    let result = crate::entity::student::Entity::find()
        .filter(crate::entity::student::Column::UserId.eq(user_id))
        .one(db)
        .await?;

    Ok(result)
}

/// Find a student by its unique (name, class_name) pair.
pub async fn find_by_name_and_class(
    db: &DatabaseConnection,
    name: &str,
    class_name: &str,
) -> AppResult<Option<crate::entity::student::Model>> {
    let result = crate::entity::student::Entity::find()
        .filter(crate::entity::student::Column::Name.eq(name))
        .filter(crate::entity::student::Column::ClassName.eq(class_name))
        .one(db)
        .await?;

    Ok(result)
}

/// List all students. Store order carries no meaning.
pub async fn list(db: &DatabaseConnection) -> AppResult<Vec<Student>> {
    let students = crate::entity::student::Entity::find().all(db).await?;

    Ok(students.into_iter().map(Into::into).collect())
}

/// List students enrolled in one class.
pub async fn list_by_class(db: &DatabaseConnection, class_name: &str) -> AppResult<Vec<Student>> {
    let students = crate::entity::student::Entity::find()
        .filter(crate::entity::student::Column::ClassName.eq(class_name))
        .all(db)
        .await?;

    Ok(students.into_iter().map(Into::into).collect())
}

/// Top students by lifetime total points, descending.
pub async fn top_by_points(db: &DatabaseConnection, limit: u64) -> AppResult<Vec<Student>> {
    let students = crate::entity::student::Entity::find()
        .order_by_desc(crate::entity::student::Column::TotalPoints)
        .limit(limit)
        .all(db)
        .await?;

    Ok(students.into_iter().map(Into::into).collect())
}

/// Count all students.
pub async fn count(db: &DatabaseConnection) -> AppResult<u64> {
    let total = crate::entity::student::Entity::find().count(db).await?;

    Ok(total)
}

/// Delete a student together with its ledger entries and linked user.
///
/// Runs in one transaction, deleting in the order records -> student ->
/// user so a partial failure cannot leave ledger entries whose subject
/// is already gone.
pub async fn delete_cascade(db: &DatabaseConnection, id: Uuid) -> AppResult<()> {
    let txn = db.begin().await?;

    let student = crate::entity::student::Entity::find_by_id(id)
        .one(&txn)
        .await?;

    let Some(student) = student else {
        txn.rollback().await?;
        return Err(AppError::NotFound("Student".to_string()));
    };

    crate::entity::behavior_record::Entity::delete_many()
        .filter(crate::entity::behavior_record::Column::StudentId.eq(id))
        .exec(&txn)
        .await?;

    crate::entity::student::Entity::delete_by_id(id)
        .exec(&txn)
        .await?;

    if let Some(user_id) = student.user_id {
        crate::entity::user::Entity::delete_by_id(user_id)
            .exec(&txn)
            .await?;
    }

    txn.commit().await?;

    Ok(())
}
