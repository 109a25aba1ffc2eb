//! Actix middleware.

mod access_log;

pub use access_log::AccessLog;
