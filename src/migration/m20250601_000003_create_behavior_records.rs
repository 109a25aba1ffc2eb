//! Migration: Create behavior_records table.
//!
//! Append-only points ledger. Rows are deleted only to reverse a prior
//! contribution; they are never updated in place.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE behavior_records (
                    id UUID PRIMARY KEY,
                    student_id UUID NOT NULL,
                    teacher_id UUID NOT NULL,
                    behavior_type VARCHAR(10) NOT NULL
                        CHECK (behavior_type IN ('positive', 'negative')),
                    points INTEGER NOT NULL
                        CHECK (points BETWEEN 1 AND 10),
                    description TEXT NOT NULL,
                    date TIMESTAMPTZ NOT NULL,

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- Per-student history is read newest-first
                CREATE INDEX idx_behavior_records_student_date
                    ON behavior_records(student_id, date DESC);

                -- Statistics count by type
                CREATE INDEX idx_behavior_records_type
                    ON behavior_records(behavior_type);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS behavior_records CASCADE;")
            .await?;

        Ok(())
    }
}
