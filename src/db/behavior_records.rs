//! Database operations for the behavior points ledger.
//!
//! Every insertion or deletion adjusts the owning student's stored total
//! through a single atomic SQL increment, inside the same transaction as
//! the ledger write. Concurrent writers against one student therefore
//! cannot lose updates, and the invariant "total_points equals the sum of
//! signed record contributions" holds at all times.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{BehaviorRecord, BehaviorType};

/// Atomically add `delta` to a student's total. Returns false when the
/// student does not exist.
///
/// A single UPDATE statement: concurrent writers serialize on the row
/// instead of racing a read-modify-write cycle.
async fn apply_delta<C: ConnectionTrait>(db: &C, student_id: Uuid, delta: i64) -> AppResult<bool> {
    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        "UPDATE students SET total_points = total_points + $1 WHERE id = $2",
        [delta.into(), student_id.into()],
    );

    let result = db.execute_raw(stmt).await?;

    Ok(result.rows_affected() > 0)
}

/// Append a ledger entry and adjust the student's running total.
///
/// The increment runs first: a zero-row update means the student does not
/// exist, and the transaction rolls back before any record is written.
/// Orphan ledger entries can never be created.
pub async fn record(
    db: &DatabaseConnection,
    student_id: Uuid,
    teacher_id: Uuid,
    behavior_type: BehaviorType,
    points: i32,
    description: &str,
) -> AppResult<BehaviorRecord> {
    let txn = db.begin().await?;

    let delta = behavior_type.signed_delta(points);
    if !apply_delta(&txn, student_id, delta).await? {
        txn.rollback().await?;
        return Err(AppError::NotFound("Student".to_string()));
    }

    let now = Utc::now();
    let model = crate::entity::behavior_record::ActiveModel {
        id: Set(Uuid::new_v4()),
        student_id: Set(student_id),
        teacher_id: Set(teacher_id),
        behavior_type: Set(behavior_type.as_str().to_string()),
        points: Set(points),
        description: Set(description.to_string()),
        date: Set(now),
        created_at: Set(now),
    };

    let inserted = model.insert(&txn).await?;

    txn.commit().await?;

    Ok(inserted.into())
}

/// Delete a ledger entry, reversing its contribution exactly.
///
/// A repeat delete fails with NotFound rather than silently succeeding.
pub async fn delete(db: &DatabaseConnection, record_id: Uuid) -> AppResult<()> {
    let txn = db.begin().await?;

    let record = crate::entity::behavior_record::Entity::find_by_id(record_id)
        .one(&txn)
        .await?;

    let Some(record) = record else {
        txn.rollback().await?;
        return Err(AppError::NotFound("Behavior record".to_string()));
    };

    let behavior_type =
        BehaviorType::parse(&record.behavior_type).unwrap_or(BehaviorType::Positive);
    let reverse_delta = -behavior_type.signed_delta(record.points);

    apply_delta(&txn, record.student_id, reverse_delta).await?;

    crate::entity::behavior_record::Entity::delete_by_id(record_id)
        .exec(&txn)
        .await?;

    txn.commit().await?;

    Ok(())
}

/// List a student's ledger entries, newest first.
pub async fn list_for_student(
    db: &DatabaseConnection,
    student_id: Uuid,
) -> AppResult<Vec<BehaviorRecord>> {
    let records = crate::entity::behavior_record::Entity::find()
        .filter(crate::entity::behavior_record::Column::StudentId.eq(student_id))
        .order_by_desc(crate::entity::behavior_record::Column::Date)
        .all(db)
        .await?;

    Ok(records.into_iter().map(Into::into).collect())
}

/// Count ledger entries of one behavior type.
pub async fn count_by_type(db: &DatabaseConnection, behavior_type: BehaviorType) -> AppResult<u64> {
    let total = crate::entity::behavior_record::Entity::find()
        .filter(crate::entity::behavior_record::Column::BehaviorType.eq(behavior_type.as_str()))
        .count(db)
        .await?;

    Ok(total)
}

/// Most recent ledger entries across all students, newest first.
pub async fn recent(db: &DatabaseConnection, limit: u64) -> AppResult<Vec<BehaviorRecord>> {
    let records = crate::entity::behavior_record::Entity::find()
        .order_by_desc(crate::entity::behavior_record::Column::Date)
        .limit(limit)
        .all(db)
        .await?;

    Ok(records.into_iter().map(Into::into).collect())
}

/// Ledger entries for a set of students dated on or after `since`.
pub async fn list_since_for_students(
    db: &DatabaseConnection,
    student_ids: &[Uuid],
    since: chrono::DateTime<chrono::Utc>,
) -> AppResult<Vec<BehaviorRecord>> {
    if student_ids.is_empty() {
        return Ok(Vec::new());
    }

    let records = crate::entity::behavior_record::Entity::find()
        .filter(crate::entity::behavior_record::Column::StudentId.is_in(student_ids.iter().copied()))
        .filter(crate::entity::behavior_record::Column::Date.gte(since))
        .all(db)
        .await?;

    Ok(records.into_iter().map(Into::into).collect())
}
