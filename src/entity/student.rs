//! Student enrollment entity.
//!
//! `total_points` is a stored running sum of all signed behavior record
//! contributions; it is only ever mutated through an atomic SQL increment.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Weak back-reference to the linked user account, if any.
    pub user_id: Option<Uuid>,
    pub name: String,
    pub class_name: String,
    pub total_points: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
