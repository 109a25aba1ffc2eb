//! Roster import: decode an uploaded CSV into student enrollments.
//!
//! Expected columns: `name`, `class` (formatted `<grade>/<section>`), and an
//! optional `password`. Every row is handled independently; a bad row adds a
//! message to the summary and the batch continues.

use csv::Trim;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use tracing::info;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::ImportSummary;
use crate::services::students as enrollment;

/// One decoded roster row.
#[derive(Debug, Deserialize)]
pub struct ImportRow {
    pub name: String,
    #[serde(rename = "class")]
    pub class_name: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// Parse uploaded CSV bytes into rows. Malformed rows become Err entries so
/// the caller can report them without aborting the batch.
pub fn parse_rows(data: &[u8]) -> Vec<Result<ImportRow, String>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(data);

    reader
        .deserialize::<ImportRow>()
        .enumerate()
        // Row numbers are 1-based and the header occupies row 1.
        .map(|(i, row)| row.map_err(|e| format!("Row {}: {}", i + 2, e)))
        .collect()
}

/// Import a roster file, enrolling one student per valid row.
pub async fn import_students(
    db: &DatabaseConnection,
    config: &Config,
    data: &[u8],
) -> AppResult<ImportSummary> {
    let mut summary = ImportSummary::default();

    for row in parse_rows(data) {
        let row = match row {
            Ok(row) => row,
            Err(message) => {
                summary.skipped_count += 1;
                summary.messages.push(message);
                continue;
            }
        };

        let name = row.name.trim();
        // Spreadsheet exports surface empty cells as "nan".
        if name.is_empty() || name.eq_ignore_ascii_case("nan") {
            summary.skipped_count += 1;
            continue;
        }

        let class_name = row.class_name.trim();
        if !class_name.contains('/') {
            summary.skipped_count += 1;
            summary.messages.push(format!(
                "{}: class '{}' is not in <grade>/<section> format",
                name, class_name
            ));
            continue;
        }

        let password = row
            .password
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(config.default_student_password.as_str());

        match enrollment::create_with_account(db, config, name, class_name, password).await {
            Ok(_) => summary.added_count += 1,
            Err(e) => {
                summary.skipped_count += 1;
                summary.messages.push(format!("{}: {}", name, e));
            }
        }
    }

    info!(
        "Roster import finished: {} added, {} skipped",
        summary.added_count, summary.skipped_count
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows_with_passwords() {
        let data = b"name,class,password\nNora Ahmed,1/A,pw123\nLina Saad,2/B,\n";
        let rows = parse_rows(data);

        assert_eq!(rows.len(), 2);
        let first = rows[0].as_ref().unwrap();
        assert_eq!(first.name, "Nora Ahmed");
        assert_eq!(first.class_name, "1/A");
        assert_eq!(first.password.as_deref(), Some("pw123"));

        // Empty CSV fields deserialize to None for Option targets.
        let second = rows[1].as_ref().unwrap();
        assert!(second.password.is_none());
    }

    #[test]
    fn test_parse_rows_without_password_column() {
        let data = b"name,class\nNora Ahmed,1/A\n";
        let rows = parse_rows(data);

        assert_eq!(rows.len(), 1);
        let row = rows[0].as_ref().unwrap();
        assert_eq!(row.name, "Nora Ahmed");
        assert!(row.password.is_none());
    }

    #[test]
    fn test_parse_rows_trims_whitespace() {
        let data = b"name,class\n  Nora Ahmed ,  1/A \n";
        let rows = parse_rows(data);

        let row = rows[0].as_ref().unwrap();
        assert_eq!(row.name, "Nora Ahmed");
        assert_eq!(row.class_name, "1/A");
    }
}
