//! Student registry endpoints.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, delete, get, post, web};
use futures_util::StreamExt;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::config::Config;
use crate::db::{DbPool, students as db_students};
use crate::error::{AppError, AppResult};
use crate::models::CreateStudentRequest;
use crate::services::{import, reports, students as enrollment};

/// Number of students shown per class in the leaderboard.
const TOP_PER_CLASS: usize = 5;

/// Configure student routes.
/// Note: More specific routes must be registered before generic ones.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_students)
        .service(create_student)
        // Specific paths first
        .service(top_by_class)
        .service(import_students)
        .service(get_student_by_user)
        // Generic paths last
        .service(get_student)
        .service(delete_student);
}

/// List all students.
///
/// GET /students
#[utoipa::path(
    get,
    path = "/api/students",
    tag = "Students",
    responses(
        (status = 200, description = "All students", body = Vec<crate::models::Student>)
    ),
    security(("bearer_token" = []))
)]
#[get("/students")]
pub async fn list_students(pool: web::Data<DbPool>, _auth: AuthUser) -> AppResult<HttpResponse> {
    let students = db_students::list(pool.connection()).await?;

    Ok(HttpResponse::Ok().json(students))
}

/// Enroll a single student.
///
/// GET /students has no role gate; creation is staff-only. Without a
/// `user_id` a linked account is auto-provisioned with the derived email
/// and the configured default password.
///
/// POST /students
#[utoipa::path(
    post,
    path = "/api/students",
    tag = "Students",
    request_body = CreateStudentRequest,
    responses(
        (status = 200, description = "Student enrolled", body = crate::models::Student),
        (status = 400, description = "Duplicate enrollment", body = crate::error::ErrorResponse),
        (status = 403, description = "Caller is not staff", body = crate::error::ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[post("/students")]
pub async fn create_student(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    auth: AuthUser,
    body: web::Json<CreateStudentRequest>,
) -> AppResult<HttpResponse> {
    auth.require_staff()?;

    let req = body.into_inner();
    let name = req.name.trim();
    let class_name = req.class_name.trim();
    if name.is_empty() || class_name.is_empty() {
        return Err(AppError::Validation(
            "Name and class are required".to_string(),
        ));
    }

    let student = match req.user_id {
        Some(user_id) => enrollment::create_linked(pool.connection(), name, class_name, user_id).await?,
        None => {
            enrollment::create_with_account(
                pool.connection(),
                config.get_ref(),
                name,
                class_name,
                &config.default_student_password,
            )
            .await?
        }
    };

    Ok(HttpResponse::Ok().json(student))
}

/// Top 5 students per class by lifetime total points.
///
/// GET /students/top/by-class
#[utoipa::path(
    get,
    path = "/api/students/top/by-class",
    tag = "Students",
    responses(
        (status = 200, description = "Map of class name to its top students")
    ),
    security(("bearer_token" = []))
)]
#[get("/students/top/by-class")]
pub async fn top_by_class(pool: web::Data<DbPool>, auth: AuthUser) -> AppResult<HttpResponse> {
    auth.require_staff()?;

    let students = db_students::list(pool.connection()).await?;
    let groups = reports::top_by_class(students, TOP_PER_CLASS);

    Ok(HttpResponse::Ok().json(groups))
}

/// Import a student roster from an uploaded CSV file.
///
/// Columns: name, class (`<grade>/<section>`), optional password. Row
/// failures are collected into the summary instead of aborting the batch.
///
/// POST /students/import
#[utoipa::path(
    post,
    path = "/api/students/import",
    tag = "Students",
    responses(
        (status = 200, description = "Import summary", body = crate::models::ImportSummary),
        (status = 400, description = "Missing or oversized file", body = crate::error::ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[post("/students/import")]
pub async fn import_students(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    auth: AuthUser,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    auth.require_staff()?;

    // Read the first file field; drain and ignore everything else.
    let mut data: Vec<u8> = Vec::new();
    let mut found_file = false;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::Validation(format!("Multipart error: {}", e)))?;

        let is_file = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .is_some();

        if found_file || !is_file {
            while let Some(chunk) = field.next().await {
                let _ = chunk;
            }
            continue;
        }

        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| AppError::Validation(format!("Read error: {}", e)))?;
            if data.len() + chunk.len() > config.max_import_size {
                return Err(AppError::Validation(format!(
                    "Import file exceeds the {} byte limit",
                    config.max_import_size
                )));
            }
            data.extend_from_slice(&chunk);
        }
        found_file = true;
    }

    if !found_file {
        return Err(AppError::Validation("No roster file uploaded".to_string()));
    }

    let summary = import::import_students(pool.connection(), config.get_ref(), &data).await?;

    Ok(HttpResponse::Ok().json(summary))
}

/// Get a student by the linked user account id.
///
/// GET /students/user/{user_id}
#[utoipa::path(
    get,
    path = "/api/students/user/{user_id}",
    tag = "Students",
    params(
        ("user_id" = String, Path, description = "Linked user UUID")
    ),
    responses(
        (status = 200, description = "Student", body = crate::models::Student),
        (status = 404, description = "No student for this user", body = crate::error::ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[get("/students/user/{user_id}")]
pub async fn get_student_by_user(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    _auth: AuthUser,
) -> AppResult<HttpResponse> {
    let user_id = Uuid::parse_str(&path.into_inner())?;

    let student = db_students::find_by_user(pool.connection(), user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student".to_string()))?;

    Ok(HttpResponse::Ok().json(crate::models::Student::from(student)))
}

/// Get a student by id.
///
/// GET /students/{id}
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    tag = "Students",
    params(
        ("id" = String, Path, description = "Student UUID")
    ),
    responses(
        (status = 200, description = "Student", body = crate::models::Student),
        (status = 404, description = "Student not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[get("/students/{id}")]
pub async fn get_student(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    _auth: AuthUser,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;

    let student = db_students::find_by_id(pool.connection(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student".to_string()))?;

    Ok(HttpResponse::Ok().json(crate::models::Student::from(student)))
}

/// Delete a student, its ledger entries, and its linked user account.
///
/// DELETE /students/{id}
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    tag = "Students",
    params(
        ("id" = String, Path, description = "Student UUID")
    ),
    responses(
        (status = 200, description = "Student deleted"),
        (status = 403, description = "Caller is not staff", body = crate::error::ErrorResponse),
        (status = 404, description = "Student not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[delete("/students/{id}")]
pub async fn delete_student(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    auth: AuthUser,
) -> AppResult<HttpResponse> {
    auth.require_staff()?;

    let id = Uuid::parse_str(&path.into_inner())?;
    db_students::delete_cascade(pool.connection(), id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Student deleted" })))
}
