//! gallery-server: painting catalogue over HTTP
//!
//! Three layers, leaf to root:
//! - `db`: connection pool and the painting DAO (hand-written SQL)
//! - `service`: pass-through between routes and the DAO
//! - `http`: axum router, JSON marshalling, error responses

pub mod db;
pub mod http;
pub mod service;

pub use db::{create_pool, DbError, PaintingDao};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
pub use service::{PaintingService, PaintingStore};
