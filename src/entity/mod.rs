//! SeaORM entity definitions for the PostgreSQL database.

pub mod behavior_record;
pub mod student;
pub mod user;
