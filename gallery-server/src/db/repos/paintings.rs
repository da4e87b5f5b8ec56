//! Painting repository
//!
//! Hand-written SQL against a table with no keys or constraints:
//! `painting(title varchar(255), year_made int)`.
//! Every statement binds its inputs; nothing is interpolated into SQL text.

use gallery_core::Painting;
use sqlx::{FromRow, SqlitePool};

const CREATE_TABLE: &str = "CREATE TABLE painting(title varchar(255), year_made int)";
const CREATE_TABLE_IF_MISSING: &str =
    "CREATE TABLE IF NOT EXISTS painting(title varchar(255), year_made int)";
const DROP_TABLE: &str = "DROP TABLE painting";

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("stored year {value} does not fit in a 32-bit integer")]
    YearOutOfRange { value: i64 },
}

/// Raw row. Columns are nullable because the schema has no constraints;
/// a NULL title stays `None`, a NULL year reads as 0.
#[derive(Debug, FromRow)]
struct PaintingRow {
    title: Option<String>,
    year_made: Option<i64>,
}

impl TryFrom<PaintingRow> for Painting {
    type Error = DbError;

    fn try_from(row: PaintingRow) -> Result<Self, Self::Error> {
        Ok(Painting {
            title: row.title,
            year_made: narrow_year(row.year_made.unwrap_or_default())?,
        })
    }
}

fn narrow_year(value: i64) -> Result<i32, DbError> {
    i32::try_from(value).map_err(|_| DbError::YearOutOfRange { value })
}

/// Data-access object for the `painting` table.
///
/// Holds the injected pool for its whole lifetime; cloning shares the pool.
#[derive(Debug, Clone)]
pub struct PaintingDao {
    pool: SqlitePool,
}

impl PaintingDao {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the table. Fails if it already exists.
    pub async fn create_table(&self) -> Result<(), DbError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        tracing::info!("created painting table");
        Ok(())
    }

    /// Create the table unless it is already there.
    pub async fn ensure_table(&self) -> Result<(), DbError> {
        sqlx::query(CREATE_TABLE_IF_MISSING)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Drop the table. Fails if it does not exist.
    pub async fn drop_table(&self) -> Result<(), DbError> {
        sqlx::query(DROP_TABLE).execute(&self.pool).await?;
        tracing::info!("dropped painting table");
        Ok(())
    }

    pub async fn insert(&self, painting: &Painting) -> Result<(), DbError> {
        sqlx::query("INSERT INTO painting(title, year_made) VALUES (?, ?)")
            .bind(&painting.title)
            .bind(painting.year_made)
            .execute(&self.pool)
            .await?;

        tracing::debug!(title = ?painting.title, year_made = painting.year_made, "inserted painting");
        Ok(())
    }

    /// All rows in the store's scan order.
    pub async fn get_all(&self) -> Result<Vec<Painting>, DbError> {
        let rows: Vec<PaintingRow> = sqlx::query_as("SELECT * FROM painting")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Painting::try_from).collect()
    }

    pub async fn get_all_by_year(&self, year: i32) -> Result<Vec<Painting>, DbError> {
        let rows: Vec<PaintingRow> = sqlx::query_as("SELECT * FROM painting WHERE year_made = ?")
            .bind(year)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Painting::try_from).collect()
    }

    /// Earliest `year_made`, or `None` when the table is empty.
    pub async fn get_oldest_year(&self) -> Result<Option<i32>, DbError> {
        // MIN over zero rows still yields one row, holding NULL
        let oldest: Option<i64> =
            sqlx::query_scalar("SELECT MIN(year_made) AS oldest_year FROM painting")
                .fetch_one(&self.pool)
                .await?;

        oldest.map(narrow_year).transpose()
    }
}
