//! Domain models and request/response types for the Meritboard API.

pub mod behavior;
pub mod report;
pub mod student;
pub mod user;

// Re-export commonly used types
pub use behavior::{BehaviorRecord, BehaviorType, CreateBehaviorRequest};
pub use report::{ImportSummary, ReportKind, ReportQuery, Statistics, StudentReportRow};
pub use student::{CreateStudentRequest, Student};
pub use user::{Claims, LoginRequest, RegisterRequest, Role, TokenResponse, User};
