//! Repository implementations for database access

pub mod paintings;

pub use paintings::{DbError, PaintingDao};
