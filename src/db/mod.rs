//! Database module providing connection management and queries.

pub mod behavior_records;
pub mod students;
pub mod users;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::Config;
use crate::error::AppResult;

/// Database connection wrapper shared across handlers.
///
/// Constructed once at startup and injected into components via app data;
/// closed explicitly on shutdown.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Connect to PostgreSQL using the configured URL.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut options = ConnectOptions::new(config.database_url.clone());
        options
            .max_connections(20)
            .connect_timeout(Duration::from_secs(10));

        let conn = Database::connect(options).await?;

        Ok(DbPool { conn })
    }

    /// Access the underlying connection for executing queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Close the connection pool.
    pub async fn close(self) -> AppResult<()> {
        self.conn.close().await?;
        Ok(())
    }
}
