//! Reporting and bulk-import response models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{BehaviorRecord, Student};

/// Dashboard statistics (admin view).
#[derive(Debug, Serialize, ToSchema)]
pub struct Statistics {
    pub total_students: u64,
    pub total_positive_records: u64,
    pub total_negative_records: u64,
    /// Top 5 students by lifetime total points.
    pub top_students: Vec<Student>,
    /// 10 most recent ledger entries, newest first.
    pub recent_activities: Vec<BehaviorRecord>,
}

/// Rolling report window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Weekly,
    Monthly,
}

impl ReportKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    /// Window length in days, ending at query time.
    pub fn window_days(&self) -> i64 {
        match self {
            Self::Weekly => 7,
            Self::Monthly => 30,
        }
    }
}

/// Query parameters for the windowed report.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReportQuery {
    #[serde(default)]
    pub class_name: Option<String>,
}

/// Per-student breakdown within a report window.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentReportRow {
    pub student_id: Uuid,
    pub name: String,
    pub class_name: String,
    /// Lifetime total, not windowed. Rows sort on this.
    pub total_points: i64,
    pub positive_count: u32,
    pub negative_count: u32,
    pub positive_points: i64,
    pub negative_points: i64,
    pub net_points: i64,
    pub total_behaviors: u32,
}

/// Result of a roster import. Row failures are collected, never fatal.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct ImportSummary {
    pub added_count: u32,
    pub skipped_count: u32,
    pub messages: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_kind_parsing() {
        assert_eq!(ReportKind::parse("weekly"), Some(ReportKind::Weekly));
        assert_eq!(ReportKind::parse("Monthly"), Some(ReportKind::Monthly));
        assert_eq!(ReportKind::parse("daily"), None);
    }

    #[test]
    fn test_window_days() {
        assert_eq!(ReportKind::Weekly.window_days(), 7);
        assert_eq!(ReportKind::Monthly.window_days(), 30);
    }
}
