//! Database Config

use std::time::Duration;

use clap::Args;
use stockroom_app::database::DatabaseSettings;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Upper bound on pooled connections.
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 100)]
    pub database_max_connections: u32,

    /// Connections kept open while idle.
    #[arg(long, env = "DATABASE_MIN_CONNECTIONS", default_value_t = 10)]
    pub database_min_connections: u32,

    /// Seconds a connection may live before it is recycled.
    #[arg(long, env = "DATABASE_MAX_LIFETIME_SECONDS", default_value_t = 3_600)]
    pub database_max_lifetime_seconds: u64,

    /// Milliseconds a transaction waits on a row lock before giving up.
    #[arg(long, env = "DATABASE_LOCK_TIMEOUT_MS", default_value_t = 5_000)]
    pub database_lock_timeout_ms: u64,
}

impl DatabaseConfig {
    #[must_use]
    pub fn database_settings(&self) -> DatabaseSettings {
        DatabaseSettings {
            url: self.database_url.clone(),
            max_connections: self.database_max_connections,
            min_connections: self.database_min_connections,
            max_lifetime: Duration::from_secs(self.database_max_lifetime_seconds),
            lock_timeout: Duration::from_millis(self.database_lock_timeout_ms),
        }
    }
}
