//! Report aggregation.
//!
//! Pure functions over already-fetched rows; the handlers fetch the student
//! and ledger slices and hand them here.

use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::models::{BehaviorRecord, BehaviorType, Student, StudentReportRow};

/// Group students by class and keep the top `limit` of each group by
/// lifetime total points, descending.
pub fn top_by_class(students: Vec<Student>, limit: usize) -> BTreeMap<String, Vec<Student>> {
    let mut groups: BTreeMap<String, Vec<Student>> = BTreeMap::new();

    for student in students {
        groups
            .entry(student.class_name.clone())
            .or_default()
            .push(student);
    }

    for group in groups.values_mut() {
        group.sort_by(|a, b| b.total_points.cmp(&a.total_points));
        group.truncate(limit);
    }

    groups
}

/// Build the per-student breakdown for a report window.
///
/// `records` must already be filtered to the window and to the given
/// students. Rows sort by lifetime total points descending, not by the
/// windowed net.
pub fn build_report_rows(
    students: &[Student],
    records: &[BehaviorRecord],
) -> Vec<StudentReportRow> {
    let mut rows: HashMap<uuid::Uuid, StudentReportRow> = students
        .iter()
        .map(|s| {
            (
                s.id,
                StudentReportRow {
                    student_id: s.id,
                    name: s.name.clone(),
                    class_name: s.class_name.clone(),
                    total_points: s.total_points,
                    positive_count: 0,
                    negative_count: 0,
                    positive_points: 0,
                    negative_points: 0,
                    net_points: 0,
                    total_behaviors: 0,
                },
            )
        })
        .collect();

    for record in records {
        let Some(row) = rows.get_mut(&record.student_id) else {
            continue;
        };

        match record.behavior_type {
            BehaviorType::Positive => {
                row.positive_count += 1;
                row.positive_points += i64::from(record.points);
            }
            BehaviorType::Negative => {
                row.negative_count += 1;
                row.negative_points += i64::from(record.points);
            }
        }

        row.net_points = row.positive_points - row.negative_points;
        row.total_behaviors = row.positive_count + row.negative_count;
    }

    let mut rows: Vec<StudentReportRow> = rows.into_values().collect();
    rows.sort_by(|a, b| b.total_points.cmp(&a.total_points));

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_student(name: &str, class_name: &str, total_points: i64) -> Student {
        Student {
            id: Uuid::new_v4(),
            user_id: None,
            name: name.to_string(),
            class_name: class_name.to_string(),
            total_points,
            created_at: Utc::now(),
        }
    }

    fn make_record(student_id: Uuid, behavior_type: BehaviorType, points: i32) -> BehaviorRecord {
        BehaviorRecord {
            id: Uuid::new_v4(),
            student_id,
            teacher_id: Uuid::new_v4(),
            behavior_type,
            points,
            description: "test".to_string(),
            date: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_top_by_class_groups_and_truncates() {
        let mut students = vec![
            make_student("a", "1/A", 3),
            make_student("b", "1/A", 9),
            make_student("c", "2/B", 5),
        ];
        for i in 0..6 {
            students.push(make_student(&format!("extra{}", i), "1/A", i));
        }

        let groups = top_by_class(students, 5);

        assert_eq!(groups.len(), 2);
        let class_a = &groups["1/A"];
        assert_eq!(class_a.len(), 5);
        assert_eq!(class_a[0].name, "b");
        assert!(class_a.windows(2).all(|w| w[0].total_points >= w[1].total_points));
        assert_eq!(groups["2/B"].len(), 1);
    }

    #[test]
    fn test_report_rows_aggregate_per_student() {
        let student = make_student("a", "1/A", 5);
        let records = vec![
            make_record(student.id, BehaviorType::Positive, 8),
            make_record(student.id, BehaviorType::Negative, 3),
            make_record(student.id, BehaviorType::Positive, 2),
        ];

        let rows = build_report_rows(std::slice::from_ref(&student), &records);

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.positive_count, 2);
        assert_eq!(row.negative_count, 1);
        assert_eq!(row.positive_points, 10);
        assert_eq!(row.negative_points, 3);
        assert_eq!(row.net_points, 7);
        assert_eq!(row.total_behaviors, 3);
        // Lifetime total comes from the student row, not the window.
        assert_eq!(row.total_points, 5);
    }

    #[test]
    fn test_report_rows_sorted_by_lifetime_total() {
        let low = make_student("low", "1/A", 1);
        let high = make_student("high", "1/A", 50);
        let records = vec![make_record(low.id, BehaviorType::Positive, 10)];

        let rows = build_report_rows(&[low, high], &records);

        assert_eq!(rows[0].name, "high");
        assert_eq!(rows[1].name, "low");
    }

    #[test]
    fn test_report_rows_ignore_foreign_records() {
        let student = make_student("a", "1/A", 0);
        let records = vec![make_record(Uuid::new_v4(), BehaviorType::Positive, 5)];

        let rows = build_report_rows(std::slice::from_ref(&student), &records);

        assert_eq!(rows[0].total_behaviors, 0);
    }
}
