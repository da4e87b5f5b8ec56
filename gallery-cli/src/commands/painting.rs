//! Painting commands - list, add, and query the oldest year
//!
//! These go through the same service layer the HTTP routes use.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gallery_core::{GalleryConfig, Painting};
use gallery_server::PaintingService;

use super::open_dao;

const MISSING_TABLE_HINT: &str = "Database query failed (run `gallery table create` first?)";

#[derive(Parser, Debug)]
pub struct PaintingArgs {
    #[command(subcommand)]
    pub command: PaintingCommand,
}

#[derive(Subcommand, Debug)]
pub enum PaintingCommand {
    /// List paintings
    List {
        /// Only paintings made in this year
        #[arg(long, allow_negative_numbers = true)]
        year: Option<i32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a painting
    Add {
        /// Painting title
        title: String,
        /// Year the painting was made
        #[arg(allow_negative_numbers = true)]
        year: i32,
    },
    /// Print the year of the oldest painting
    Oldest,
}

pub async fn run_painting(args: PaintingArgs, config: &GalleryConfig) -> Result<()> {
    let dao = open_dao(config).await?;
    let pool = dao.pool().clone();
    let service = PaintingService::new(dao);

    let result = dispatch(args.command, &service).await;
    pool.close().await;
    result
}

async fn dispatch(command: PaintingCommand, service: &PaintingService) -> Result<()> {
    match command {
        PaintingCommand::List { year, json } => {
            let paintings = match year {
                Some(year) => service.get_all_paintings_made_in_year(year).await,
                None => service.get_all_paintings().await,
            }
            .context(MISSING_TABLE_HINT)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&paintings)?);
            } else if paintings.is_empty() {
                println!("no paintings");
            } else {
                for painting in &paintings {
                    println!("{}", painting);
                }
            }
        }
        PaintingCommand::Add { title, year } => {
            let painting = service
                .insert_painting(Painting::new(title, year))
                .await
                .context(MISSING_TABLE_HINT)?;
            println!("{}", painting);
        }
        PaintingCommand::Oldest => {
            match service
                .get_oldest_painting_year()
                .await
                .context(MISSING_TABLE_HINT)?
            {
                Some(year) => println!("{}", year),
                None => println!("no paintings"),
            }
        }
    }
    Ok(())
}
