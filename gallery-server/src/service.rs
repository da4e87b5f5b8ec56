//! Service layer between the HTTP routes and the painting DAO
//!
//! Forwards every call unchanged. The `PaintingStore` trait is the seam
//! that lets the service run against a mock store in tests.

use std::sync::Arc;

use async_trait::async_trait;
use gallery_core::Painting;

use crate::db::{DbError, PaintingDao};

/// Painting storage operations the service depends on
#[async_trait]
pub trait PaintingStore: Send + Sync {
    async fn insert(&self, painting: &Painting) -> Result<(), DbError>;
    async fn get_all(&self) -> Result<Vec<Painting>, DbError>;
    async fn get_all_by_year(&self, year: i32) -> Result<Vec<Painting>, DbError>;
    async fn get_oldest_year(&self) -> Result<Option<i32>, DbError>;
}

#[async_trait]
impl PaintingStore for PaintingDao {
    async fn insert(&self, painting: &Painting) -> Result<(), DbError> {
        PaintingDao::insert(self, painting).await
    }

    async fn get_all(&self) -> Result<Vec<Painting>, DbError> {
        PaintingDao::get_all(self).await
    }

    async fn get_all_by_year(&self, year: i32) -> Result<Vec<Painting>, DbError> {
        PaintingDao::get_all_by_year(self, year).await
    }

    async fn get_oldest_year(&self) -> Result<Option<i32>, DbError> {
        PaintingDao::get_oldest_year(self).await
    }
}

/// Painting service
#[derive(Clone)]
pub struct PaintingService {
    store: Arc<dyn PaintingStore>,
}

impl PaintingService {
    pub fn new(store: impl PaintingStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub async fn get_all_paintings(&self) -> Result<Vec<Painting>, DbError> {
        self.store.get_all().await
    }

    pub async fn get_all_paintings_made_in_year(&self, year: i32) -> Result<Vec<Painting>, DbError> {
        self.store.get_all_by_year(year).await
    }

    pub async fn get_oldest_painting_year(&self) -> Result<Option<i32>, DbError> {
        self.store.get_oldest_year().await
    }

    /// Store `painting` and hand the same value back.
    pub async fn insert_painting(&self, painting: Painting) -> Result<Painting, DbError> {
        self.store.insert(&painting).await?;
        Ok(painting)
    }
}

/// In-memory store for tests
#[cfg(test)]
#[derive(Default)]
pub(crate) struct MockStore {
    rows: std::sync::Mutex<Vec<Painting>>,
    fail: bool,
}

#[cfg(test)]
impl MockStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails
    pub(crate) fn failing() -> Self {
        Self {
            rows: Default::default(),
            fail: true,
        }
    }

    fn check(&self) -> Result<(), DbError> {
        if self.fail {
            Err(DbError::Sqlx(sqlx::Error::PoolClosed))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
#[async_trait]
impl PaintingStore for MockStore {
    async fn insert(&self, painting: &Painting) -> Result<(), DbError> {
        self.check()?;
        self.rows.lock().unwrap().push(painting.clone());
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Painting>, DbError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn get_all_by_year(&self, year: i32) -> Result<Vec<Painting>, DbError> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.year_made == year)
            .cloned()
            .collect())
    }

    async fn get_oldest_year(&self) -> Result<Option<i32>, DbError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().iter().map(|p| p.year_made).min())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_returns_given_painting() {
        let service = PaintingService::new(MockStore::new());
        let mona = Painting::new("Mona Lisa", 1503);

        let returned = service.insert_painting(mona.clone()).await.unwrap();

        assert_eq!(returned, mona);
        assert_eq!(service.get_all_paintings().await.unwrap(), vec![mona]);
    }

    #[tokio::test]
    async fn forwards_year_filter() {
        let service = PaintingService::new(MockStore::new());
        service
            .insert_painting(Painting::new("Mona Lisa", 1503))
            .await
            .unwrap();
        service
            .insert_painting(Painting::new("Starry Night", 1889))
            .await
            .unwrap();

        let found = service.get_all_paintings_made_in_year(1889).await.unwrap();
        assert_eq!(found, vec![Painting::new("Starry Night", 1889)]);
        assert_eq!(service.get_oldest_painting_year().await.unwrap(), Some(1503));
    }

    #[tokio::test]
    async fn store_errors_propagate() {
        let service = PaintingService::new(MockStore::failing());

        assert!(service.get_all_paintings().await.is_err());
        assert!(service
            .insert_painting(Painting::new("Lost", 1900))
            .await
            .is_err());
        assert!(service.get_oldest_painting_year().await.is_err());
    }
}
