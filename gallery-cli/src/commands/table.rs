//! Table maintenance - create, drop, or reset the painting table

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gallery_core::GalleryConfig;

use super::open_dao;

#[derive(Parser, Debug)]
pub struct TableArgs {
    #[command(subcommand)]
    pub command: TableCommand,
}

#[derive(Subcommand, Debug)]
pub enum TableCommand {
    /// Create the painting table (fails if it exists)
    Create,
    /// Drop the painting table and every row in it
    Drop,
    /// Drop the table if present, then create it empty
    Reset,
}

pub async fn run_table(args: TableArgs, config: &GalleryConfig) -> Result<()> {
    let dao = open_dao(config).await?;

    let result = match args.command {
        TableCommand::Create => dao
            .create_table()
            .await
            .context("Failed to create painting table (does it already exist?)"),
        TableCommand::Drop => dao
            .drop_table()
            .await
            .context("Failed to drop painting table (does it exist?)"),
        TableCommand::Reset => reset(&dao).await,
    };

    dao.pool().close().await;
    result?;

    println!("ok");
    Ok(())
}

async fn reset(dao: &gallery_server::PaintingDao) -> Result<()> {
    dao.ensure_table().await?;
    dao.drop_table().await?;
    dao.create_table().await?;
    Ok(())
}
