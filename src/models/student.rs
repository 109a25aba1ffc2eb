//! Student models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Student as exposed through the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub class_name: String,
    pub total_points: i64,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::student::Model> for Student {
    fn from(m: crate::entity::student::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            name: m.name,
            class_name: m.class_name,
            total_points: m.total_points,
            created_at: m.created_at,
        }
    }
}

/// Request to enroll a single student.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStudentRequest {
    pub name: String,
    pub class_name: String,
    /// Link an existing user account instead of auto-provisioning one.
    #[serde(default)]
    pub user_id: Option<Uuid>,
}
