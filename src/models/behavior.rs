//! Behavior record models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Whether a record awards or deducts points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorType {
    Positive,
    Negative,
}

impl BehaviorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "positive" => Some(Self::Positive),
            "negative" => Some(Self::Negative),
            _ => None,
        }
    }

    /// The signed contribution this type applies to a student's total.
    pub fn signed_delta(&self, points: i32) -> i64 {
        match self {
            Self::Positive => i64::from(points),
            Self::Negative => -i64::from(points),
        }
    }
}

impl std::fmt::Display for BehaviorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in the points ledger.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BehaviorRecord {
    pub id: Uuid,
    pub student_id: Uuid,
    pub teacher_id: Uuid,
    pub behavior_type: BehaviorType,
    pub points: i32,
    pub description: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::behavior_record::Model> for BehaviorRecord {
    fn from(m: crate::entity::behavior_record::Model) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            teacher_id: m.teacher_id,
            // Backed by a CHECK constraint; positive is the safe fallback.
            behavior_type: BehaviorType::parse(&m.behavior_type).unwrap_or(BehaviorType::Positive),
            points: m.points,
            description: m.description,
            date: m.date,
            created_at: m.created_at,
        }
    }
}

/// Request to record behavior points against a student. The teacher is
/// attributed from the bearer token, never from the body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBehaviorRequest {
    pub student_id: Uuid,
    pub behavior_type: BehaviorType,
    pub points: i32,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_delta() {
        assert_eq!(BehaviorType::Positive.signed_delta(8), 8);
        assert_eq!(BehaviorType::Negative.signed_delta(3), -3);
        assert_eq!(BehaviorType::Negative.signed_delta(10), -10);
    }

    #[test]
    fn test_running_total_sequence_with_reversal() {
        // +8 positive, +3 negative, then reverse the positive record.
        let mut total = 0i64;
        total += BehaviorType::Positive.signed_delta(8);
        assert_eq!(total, 8);
        total += BehaviorType::Negative.signed_delta(3);
        assert_eq!(total, 5);
        total -= BehaviorType::Positive.signed_delta(8);
        assert_eq!(total, -3);
    }

    #[test]
    fn test_behavior_type_parsing() {
        assert_eq!(BehaviorType::parse("positive"), Some(BehaviorType::Positive));
        assert_eq!(BehaviorType::parse("NEGATIVE"), Some(BehaviorType::Negative));
        assert_eq!(BehaviorType::parse("neutral"), None);
    }
}
