//! gallery-core: the painting entity and configuration shared by the
//! server and the command-line tool.

pub mod config;
pub mod error;
pub mod painting;

pub use config::GalleryConfig;
pub use error::{GalleryError, Result};
pub use painting::Painting;
