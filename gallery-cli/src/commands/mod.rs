//! Command implementations for the gallery CLI

pub mod painting;
pub mod serve;
pub mod table;

// Re-export main dispatcher functions for flat access from main.rs
pub use painting::run_painting;
pub use serve::run_serve;
pub use table::run_table;

use anyhow::{Context, Result};
use gallery_core::GalleryConfig;
use gallery_server::db::create_pool_with_options;
use gallery_server::PaintingDao;

/// Open the configured database file and wrap it in a DAO
pub(crate) async fn open_dao(config: &GalleryConfig) -> Result<PaintingDao> {
    let pool = create_pool_with_options(&config.database_path, config.max_connections)
        .await
        .with_context(|| {
            format!(
                "Failed to open database {}",
                config.database_path.display()
            )
        })?;

    Ok(PaintingDao::new(pool))
}
