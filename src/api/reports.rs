//! Statistics and windowed report endpoints.

use actix_web::{HttpResponse, get, web};
use chrono::{Duration, Utc};

use crate::auth::AuthUser;
use crate::db::{DbPool, behavior_records, students as db_students};
use crate::error::{AppError, AppResult};
use crate::models::{BehaviorType, ReportKind, ReportQuery, Statistics};
use crate::services::reports;

/// How many students the dashboard leaderboard shows.
const TOP_STUDENTS: u64 = 5;
/// How many ledger entries the dashboard activity feed shows.
const RECENT_ACTIVITIES: u64 = 10;

/// Configure report routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(statistics).service(report);
}

/// Dashboard statistics.
///
/// GET /statistics
#[utoipa::path(
    get,
    path = "/api/statistics",
    tag = "Reports",
    responses(
        (status = 200, description = "Aggregate statistics", body = Statistics),
        (status = 403, description = "Caller is not an admin", body = crate::error::ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[get("/statistics")]
pub async fn statistics(pool: web::Data<DbPool>, auth: AuthUser) -> AppResult<HttpResponse> {
    auth.require_admin()?;

    let conn = pool.connection();

    let total_students = db_students::count(conn).await?;
    let total_positive_records =
        behavior_records::count_by_type(conn, BehaviorType::Positive).await?;
    let total_negative_records =
        behavior_records::count_by_type(conn, BehaviorType::Negative).await?;
    let top_students = db_students::top_by_points(conn, TOP_STUDENTS).await?;
    let recent_activities = behavior_records::recent(conn, RECENT_ACTIVITIES).await?;

    Ok(HttpResponse::Ok().json(Statistics {
        total_students,
        total_positive_records,
        total_negative_records,
        top_students,
        recent_activities,
    }))
}

/// Windowed per-student report.
///
/// `kind` is `weekly` (last 7 days) or `monthly` (last 30 days); an optional
/// `class_name` query restricts the student set. Rows sort by lifetime total
/// points descending.
///
/// GET /reports/{kind}?class_name=
#[utoipa::path(
    get,
    path = "/api/reports/{kind}",
    tag = "Reports",
    params(
        ("kind" = String, Path, description = "Report window: weekly or monthly"),
        ("class_name" = Option<String>, Query, description = "Restrict to one class")
    ),
    responses(
        (status = 200, description = "Per-student breakdown", body = Vec<crate::models::StudentReportRow>),
        (status = 400, description = "Unknown report kind", body = crate::error::ErrorResponse),
        (status = 403, description = "Caller is not staff", body = crate::error::ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[get("/reports/{kind}")]
pub async fn report(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    query: web::Query<ReportQuery>,
    auth: AuthUser,
) -> AppResult<HttpResponse> {
    auth.require_staff()?;

    let kind = path.into_inner();
    let kind = ReportKind::parse(&kind)
        .ok_or_else(|| AppError::Validation(format!("Unknown report kind '{}'", kind)))?;

    let conn = pool.connection();

    let students = match query.class_name.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(class_name) => db_students::list_by_class(conn, class_name).await?,
        None => db_students::list(conn).await?,
    };

    let window_start = Utc::now() - Duration::days(kind.window_days());
    let student_ids: Vec<uuid::Uuid> = students.iter().map(|s| s.id).collect();
    let records =
        behavior_records::list_since_for_students(conn, &student_ids, window_start).await?;

    let rows = reports::build_report_rows(&students, &records);

    Ok(HttpResponse::Ok().json(rows))
}
