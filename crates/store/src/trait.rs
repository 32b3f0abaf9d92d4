//! Repository interfaces over the persistence collaborator.

use async_trait::async_trait;
use thiserror::Error;

use tenderi_core::{Ponude, PonudeCriteria, Postupci};

use crate::query::{Page, Pageable};

/// Store-layer failure.
///
/// These are infrastructure faults, not domain errors; the boundary reports
/// them as internal errors and performs no retries.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(String),
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Data access for offers, including criteria-driven scans.
#[async_trait]
pub trait PonudeRepository: Send + Sync {
    /// Insert (assigning the next identifier) or replace by identifier.
    async fn save(&self, entity: Ponude) -> Result<Ponude, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Ponude>, StoreError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError>;

    /// Delete-if-exists; an absent identifier is not an error.
    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError>;

    async fn find_all(&self, pageable: &Pageable) -> Result<Page<Ponude>, StoreError>;

    async fn find_by_criteria(
        &self,
        criteria: &PonudeCriteria,
        pageable: &Pageable,
    ) -> Result<Page<Ponude>, StoreError>;

    async fn count_by_criteria(&self, criteria: &PonudeCriteria) -> Result<u64, StoreError>;
}

/// Data access for procedures. This family has no criteria support.
#[async_trait]
pub trait PostupciRepository: Send + Sync {
    async fn save(&self, entity: Postupci) -> Result<Postupci, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Postupci>, StoreError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError>;

    async fn find_all(&self, pageable: &Pageable) -> Result<Page<Postupci>, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;
}
