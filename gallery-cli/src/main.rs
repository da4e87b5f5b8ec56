//! gallery CLI - painting catalogue service and maintenance tool
//!
//! - `serve`: run the HTTP API
//! - `table`: create, drop, or reset the painting table
//! - `painting`: list, add, and query paintings from the terminal

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gallery_core::GalleryConfig;

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "gallery",
    author,
    version,
    about = "Painting catalogue: HTTP API over an embedded SQLite database"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// SQLite database file (overrides config and GALLERY_DATABASE_PATH)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create, drop, or reset the painting table
    Table(commands::table::TableArgs),
    /// List, add, and query paintings
    Painting(commands::painting::PaintingArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present, don't fail when absent
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    let mut config = GalleryConfig::load().context("Failed to load configuration")?;
    if let Some(database) = cli.database {
        config.database_path = database;
    }

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, config).await?,
        Commands::Table(args) => commands::run_table(args, &config).await?,
        Commands::Painting(args) => commands::run_painting(args, &config).await?,
    }
    Ok(())
}
