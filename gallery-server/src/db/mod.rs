//! Database layer - connection pool and repositories
//!
//! - Pool is created once at startup and injected into the DAO
//! - Each statement acquires a pooled connection, released on drop
//! - Every failure is returned to the caller as `DbError`

pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
