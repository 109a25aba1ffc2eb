//! API endpoint modules.

pub mod auth;
pub mod behavior;
pub mod health;
pub mod openapi;
pub mod reports;
pub mod students;

pub use auth::configure_routes as configure_auth_routes;
pub use behavior::configure_routes as configure_behavior_routes;
pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use reports::configure_routes as configure_report_routes;
pub use students::configure_routes as configure_student_routes;
