//! Application Config

use std::path::PathBuf;

use clap::{ArgAction, Args};
use stockroom_app::context::{DEFAULT_PRIMARY_LOCATION, DEFAULT_UPLOAD_DIR};

/// Stock, order and upload settings.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Apply pending migrations at startup.
    #[arg(
        long,
        env = "RUN_MIGRATIONS",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub run_migrations: bool,

    /// Load sample data at startup when the catalog is empty.
    #[arg(
        long,
        env = "SEED_IF_EMPTY",
        default_value_t = false,
        action = ArgAction::Set
    )]
    pub seed_if_empty: bool,

    /// Location used when a request names none.
    #[arg(long, env = "PRIMARY_LOCATION", default_value = DEFAULT_PRIMARY_LOCATION)]
    pub primary_location: String,

    /// Directory uploaded product images are written under.
    #[arg(long, env = "UPLOAD_DIR", default_value = DEFAULT_UPLOAD_DIR)]
    pub upload_dir: PathBuf,
}
