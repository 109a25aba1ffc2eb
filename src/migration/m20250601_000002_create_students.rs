//! Migration: Create students table.

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
                CREATE TABLE students (
                    id UUID PRIMARY KEY,
                    user_id UUID,
                    name VARCHAR(255) NOT NULL,
                    class_name VARCHAR(100) NOT NULL,
                    total_points BIGINT NOT NULL DEFAULT 0,

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- One enrollment per (name, class) pair
                CREATE UNIQUE INDEX idx_students_name_class
                    ON students(name, class_name);

                -- Lookup by linked user account
                CREATE INDEX idx_students_user_id ON students(user_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS students CASCADE;")
            .await?;

        Ok(())
    }
}
