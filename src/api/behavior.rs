//! Behavior ledger endpoints.

use actix_web::{HttpResponse, delete, get, post, web};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db::{DbPool, behavior_records};
use crate::error::{AppError, AppResult};
use crate::models::CreateBehaviorRequest;

/// Allowed points range for a single record.
const MIN_POINTS: i32 = 1;
const MAX_POINTS: i32 = 10;

/// Configure behavior routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_record)
        .service(list_for_student)
        .service(delete_record);
}

/// Record behavior points against a student.
///
/// The recording teacher is taken from the bearer token. Points are
/// validated before anything is written.
///
/// POST /behavior
#[utoipa::path(
    post,
    path = "/api/behavior",
    tag = "Behavior",
    request_body = CreateBehaviorRequest,
    responses(
        (status = 200, description = "Record appended", body = crate::models::BehaviorRecord),
        (status = 400, description = "Points out of range", body = crate::error::ErrorResponse),
        (status = 403, description = "Caller is not staff", body = crate::error::ErrorResponse),
        (status = 404, description = "Student not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[post("/behavior")]
pub async fn create_record(
    pool: web::Data<DbPool>,
    auth: AuthUser,
    body: web::Json<CreateBehaviorRequest>,
) -> AppResult<HttpResponse> {
    auth.require_staff()?;

    let req = body.into_inner();
    if !(MIN_POINTS..=MAX_POINTS).contains(&req.points) {
        return Err(AppError::Validation(format!(
            "Points must be between {} and {}",
            MIN_POINTS, MAX_POINTS
        )));
    }

    let record = behavior_records::record(
        pool.connection(),
        req.student_id,
        auth.user.id,
        req.behavior_type,
        req.points,
        req.description.trim(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(record))
}

/// List a student's behavior records, newest first.
///
/// GET /behavior/student/{student_id}
#[utoipa::path(
    get,
    path = "/api/behavior/student/{student_id}",
    tag = "Behavior",
    params(
        ("student_id" = String, Path, description = "Student UUID")
    ),
    responses(
        (status = 200, description = "Ledger entries", body = Vec<crate::models::BehaviorRecord>)
    ),
    security(("bearer_token" = []))
)]
#[get("/behavior/student/{student_id}")]
pub async fn list_for_student(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    _auth: AuthUser,
) -> AppResult<HttpResponse> {
    let student_id = Uuid::parse_str(&path.into_inner())?;

    let records = behavior_records::list_for_student(pool.connection(), student_id).await?;

    Ok(HttpResponse::Ok().json(records))
}

/// Delete a behavior record, reversing its points contribution.
///
/// DELETE /behavior/{id}
#[utoipa::path(
    delete,
    path = "/api/behavior/{id}",
    tag = "Behavior",
    params(
        ("id" = String, Path, description = "Record UUID")
    ),
    responses(
        (status = 200, description = "Record deleted and contribution reversed"),
        (status = 403, description = "Caller is not staff", body = crate::error::ErrorResponse),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[delete("/behavior/{id}")]
pub async fn delete_record(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    auth: AuthUser,
) -> AppResult<HttpResponse> {
    auth.require_staff()?;

    let id = Uuid::parse_str(&path.into_inner())?;
    behavior_records::delete(pool.connection(), id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Record deleted" })))
}
