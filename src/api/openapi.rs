//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Meritboard Server",
        version = "0.3.0",
        description = "API server for tracking student behavior points, class leaderboards, and windowed reports"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Auth endpoints
        api::auth::register,
        api::auth::login,
        api::auth::me,
        // Student endpoints
        api::students::list_students,
        api::students::create_student,
        api::students::top_by_class,
        api::students::import_students,
        api::students::get_student_by_user,
        api::students::get_student,
        api::students::delete_student,
        // Behavior endpoints
        api::behavior::create_record,
        api::behavior::list_for_student,
        api::behavior::delete_record,
        // Report endpoints
        api::reports::statistics,
        api::reports::report,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Auth
            models::Role,
            models::RegisterRequest,
            models::LoginRequest,
            models::TokenResponse,
            models::User,
            // Students
            models::Student,
            models::CreateStudentRequest,
            models::ImportSummary,
            // Behavior
            models::BehaviorType,
            models::BehaviorRecord,
            models::CreateBehaviorRequest,
            // Reports
            models::Statistics,
            models::StudentReportRow,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Registration, login, and identity"),
        (name = "Students", description = "Student registry and roster import"),
        (name = "Behavior", description = "Behavior points ledger"),
        (name = "Reports", description = "Statistics and windowed reports")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add bearer token security scheme.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
