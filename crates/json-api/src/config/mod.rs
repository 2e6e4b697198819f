//! Server configuration module

use clap::Parser;

pub(crate) use observability::LogFormat;

use crate::config::{
    app::AppConfig, db::DatabaseConfig, observability::LoggingConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod app;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Stockroom JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "stockroom-json", about = "Stockroom JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Stock, order and upload settings.
    #[command(flatten)]
    pub app: AppConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings for assembling the application services.
    #[must_use]
    pub fn app_settings(&self) -> stockroom_app::context::AppSettings {
        let mut settings =
            stockroom_app::context::AppSettings::new(self.database.database_settings());

        settings.run_migrations = self.app.run_migrations;
        settings.primary_location.clone_from(&self.app.primary_location);
        settings.upload_dir.clone_from(&self.app.upload_dir);

        settings
    }
}
