//! Stockroom Application CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use rand::{SeedableRng, rngs::StdRng};
use stockroom_app::{
    context::{AppContext, AppSettings, DEFAULT_PRIMARY_LOCATION},
    database::{self, DatabaseSettings},
    seeding::SeedOutcome,
};

#[derive(Debug, Parser)]
#[command(name = "stockroom-app", about = "Stockroom CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate(DatabaseArgs),

    /// Load sample products, stock and orders into an empty catalog
    Seed(SeedArgs),
}

#[derive(Debug, Args)]
struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct SeedArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Location sample orders draw stock from
    #[arg(long, env = "PRIMARY_LOCATION", default_value = DEFAULT_PRIMARY_LOCATION)]
    primary_location: String,

    /// Seed for the sample data generator; random when omitted
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Migrate(args) => migrate(args).await,
        Commands::Seed(args) => seed(args).await,
    }
}

async fn migrate(args: DatabaseArgs) -> Result<(), String> {
    let mut settings = DatabaseSettings::new(args.database_url);
    settings.min_connections = 0;

    let pool = database::connect(&settings)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    println!("migrations applied");

    Ok(())
}

async fn seed(args: SeedArgs) -> Result<(), String> {
    let mut database = DatabaseSettings::new(args.database.database_url);
    database.min_connections = 0;

    let mut settings = AppSettings::new(database);
    settings.primary_location = args.primary_location;

    let app = AppContext::from_settings(&settings)
        .await
        .map_err(|error| format!("failed to initialize app context: {error}"))?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let outcome = app
        .seed_if_empty(&mut rng)
        .await
        .map_err(|error| format!("failed to seed database: {error}"))?;

    match outcome {
        SeedOutcome::Skipped { existing_products } => {
            println!("catalog already holds {existing_products} products; nothing seeded");
        }
        SeedOutcome::Seeded {
            products,
            stock_records,
            orders,
            skipped_orders,
        } => {
            println!("products: {products}");
            println!("stock_records: {stock_records}");
            println!("orders: {orders}");
            println!("skipped_orders: {skipped_orders}");
        }
    }

    Ok(())
}
