//! Stockroom JSON API Server

use std::process;

use rand::{SeedableRng, rngs::StdRng};
use salvo::{
    affix_state::inject,
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use stockroom_app::{context::AppContext, seeding::SeedOutcome};

use crate::{config::ServerConfig, state::State};

mod config;
mod errors;
mod extensions;
mod healthcheck;
mod inventory;
mod observability;
mod orders;
mod products;
mod reports;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Stockroom JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }
        process::exit(1);
    });

    if let Err(init_error) = observability::init(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Observability error: {init_error}");
        }
        process::exit(1);
    }

    let app = match AppContext::from_settings(&config.app_settings()).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");
            process::exit(1);
        }
    };

    if config.app.seed_if_empty {
        seed(&app).await;
    }

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(observability::request_logging)
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(router::app_router());

    let doc = OpenApi::new("Stockroom API", env!("CARGO_PKG_VERSION")).merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;
}

/// Load sample data into an empty catalog. Failures are logged and the server
/// starts regardless.
async fn seed(app: &AppContext) {
    let mut rng = StdRng::from_entropy();

    match app.seed_if_empty(&mut rng).await {
        Ok(SeedOutcome::Skipped { existing_products }) => {
            info!(existing_products, "catalog not empty, skipping seed");
        }
        Ok(SeedOutcome::Seeded {
            products,
            stock_records,
            orders,
            skipped_orders,
        }) => {
            info!(
                products,
                stock_records, orders, skipped_orders, "seeded sample data"
            );
        }
        Err(seed_error) => error!("failed to seed sample data: {seed_error}"),
    }
}
