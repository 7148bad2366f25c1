//! price-lookup: first-product price lookups for shopping search pages
//!
//! This is the main entry point for the application.

use anyhow::Result;
use clap::{Parser, Subcommand};
use price_lookup::{
    config,
    web::{create_router, AppState},
    PriceLookup,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "price-lookup", version, about)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = config::SETTINGS_PATH_VAR)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Look up a single query and print the product as JSON
    Lookup {
        /// Product search query
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let settings = config::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(settings).await,
        Command::Lookup { query } => lookup_once(settings, &query).await,
    }
}

async fn serve(settings: config::Settings) -> Result<()> {
    info!("Starting price-lookup v{}", price_lookup::VERSION);

    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    // Create application state
    let state = AppState::new(&settings)?;
    info!("Application state initialized");

    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn lookup_once(settings: config::Settings, query: &str) -> Result<()> {
    let lookup = PriceLookup::from_settings(&settings)?;

    let product = lookup.lookup(query).await?;
    println!("{}", serde_json::to_string(&product)?);
    Ok(())
}
