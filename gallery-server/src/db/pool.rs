//! SQLite connection pool management
//!
//! The database is a single file on local disk. Connections are handed out
//! per statement and returned to the pool when dropped.

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;

/// Default maximum connections for the pool.
/// Kept low for a single-file embedded database.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open (creating if missing) the SQLite file at `db_path` behind a pool.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the first
/// connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("gallery.db").await?;
/// ```
pub async fn create_pool(db_path: impl AsRef<Path>) -> Result<SqlitePool, sqlx::Error> {
    create_pool_with_options(db_path, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a pool with an explicit connection limit.
pub async fn create_pool_with_options(
    db_path: impl AsRef<Path>,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let db_path = db_path.as_ref();

    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT)
        .synchronous(SqliteSynchronous::Normal);

    tracing::debug!(path = %db_path.display(), max_connections, "opening database pool");

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pool_acquires_connection() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_pool(dir.path().join("gallery.db")).await.unwrap();

        let result: (i64,) = sqlx::query_as("SELECT 1").fetch_one(&pool).await.unwrap();
        assert_eq!(result.0, 1);

        pool.close().await;
        assert!(pool.is_closed());
    }

    #[tokio::test]
    async fn creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("gallery.db");

        let pool = create_pool(&db_path).await.unwrap();
        pool.close().await;

        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn concurrent_pool_access() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_pool_with_options(dir.path().join("gallery.db"), 3)
            .await
            .unwrap();

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    let result: (i64,) = sqlx::query_as("SELECT ?")
                        .bind(i as i64)
                        .fetch_one(&pool)
                        .await
                        .expect("concurrent query failed");
                    result.0
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.expect("task panicked");
            assert_eq!(result, i as i64);
        }
    }
}
