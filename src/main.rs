mod config;
mod database;
mod errors;
mod geo;
mod hierarchy;
mod server;
mod services;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use database::connection::{establish_connection, get_database_url};
use services::SeedService;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP directory service
    Serve {
        #[clap(short, long, default_value = "3000")]
        port: u16,
        #[clap(short, long, default_value = "orgdir.db")]
        database: String,
        #[clap(long)]
        cors_origin: Option<String>,
        /// Load the demo dataset on startup if the database is empty
        #[clap(long)]
        seed: bool,
    },
    /// Database maintenance
    Db {
        #[clap(subcommand)]
        command: DbCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DbCommands {
    Init {
        #[clap(short, long, default_value = "orgdir.db")]
        database: String,
    },
    Migrate {
        #[clap(subcommand)]
        direction: server::MigrateDirection,
        #[clap(short, long, default_value = "orgdir.db")]
        database: String,
    },
    Seed {
        #[clap(short, long, default_value = "orgdir.db")]
        database: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    match args.command {
        Commands::Serve {
            port,
            database,
            cors_origin,
            seed,
        } => {
            info!("Starting server on port {}", port);
            let config = AppConfig::new(port, database, cors_origin);
            server::start_server(config, seed).await?;
        }
        Commands::Db { command } => match command {
            DbCommands::Init { database } => {
                info!("Initializing database: {}", database);
                server::migrate_database(&database, server::MigrateDirection::Up).await?;
            }
            DbCommands::Migrate {
                direction,
                database,
            } => {
                info!("Migrating database: {} ({:?})", database, direction);
                server::migrate_database(&database, direction).await?;
            }
            DbCommands::Seed { database } => {
                info!("Seeding database: {}", database);
                server::migrate_database(&database, server::MigrateDirection::Up).await?;
                let db = establish_connection(&get_database_url(Some(&database))).await?;
                SeedService::new(db).seed_demo_data().await?;
            }
        },
    }

    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("sqlx=warn,{}", log_level)))
        .without_time()
        .init();
}
