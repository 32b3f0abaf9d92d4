//! In-memory keyed store.
//!
//! Intended for tests/dev. Not optimized for performance.

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};

use async_trait::async_trait;

use tenderi_core::{Ponude, PonudeCriteria, Postupci, Record};

use crate::query::{Page, Pageable};
use crate::r#trait::{PonudeRepository, PostupciRepository, StoreError};

/// Generic keyed table: id-ordered rows plus an identifier sequence.
#[derive(Debug)]
pub struct InMemoryTable<T: Record> {
    rows: RwLock<BTreeMap<i64, T>>,
    sequence: AtomicI64,
}

impl<T: Record> InMemoryTable<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            sequence: AtomicI64::new(0),
        }
    }

    fn lock_err<E>(_: E) -> StoreError {
        StoreError::Backend("lock poisoned".to_owned())
    }

    /// Insert (assigning the next identifier) or replace by identifier.
    pub fn save(&self, mut entity: T) -> Result<T, StoreError> {
        let mut rows = self.rows.write().map_err(Self::lock_err)?;
        let id = match entity.id() {
            Some(id) => {
                // Keep the sequence ahead of explicitly keyed rows.
                self.sequence.fetch_max(id, AtomicOrdering::SeqCst);
                id
            }
            None => {
                let id = self.sequence.fetch_add(1, AtomicOrdering::SeqCst) + 1;
                entity.set_id(id);
                id
            }
        };
        rows.insert(id, entity.clone());
        Ok(entity)
    }

    pub fn get(&self, id: i64) -> Result<Option<T>, StoreError> {
        let rows = self.rows.read().map_err(Self::lock_err)?;
        Ok(rows.get(&id).cloned())
    }

    pub fn exists(&self, id: i64) -> Result<bool, StoreError> {
        let rows = self.rows.read().map_err(Self::lock_err)?;
        Ok(rows.contains_key(&id))
    }

    /// Remove-if-present; absent identifiers are not an error.
    pub fn remove(&self, id: i64) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(Self::lock_err)?;
        rows.remove(&id);
        Ok(())
    }

    /// Filtered, sorted, paged scan. `total` counts every match, not just the
    /// records on the returned page.
    pub fn scan(
        &self,
        matches: impl Fn(&T) -> bool,
        pageable: &Pageable,
    ) -> Result<Page<T>, StoreError> {
        let mut items: Vec<T> = {
            let rows = self.rows.read().map_err(Self::lock_err)?;
            rows.values().filter(|r| matches(r)).cloned().collect()
        };
        if !pageable.sort.is_empty() {
            items.sort_by(|a, b| pageable.compare(a, b));
        }
        let total = items.len() as u64;
        let items = items
            .into_iter()
            .skip(pageable.offset())
            .take(pageable.size as usize)
            .collect();
        Ok(Page {
            items,
            total,
            pageable: pageable.clone(),
        })
    }

    pub fn count(&self, matches: impl Fn(&T) -> bool) -> Result<u64, StoreError> {
        let rows = self.rows.read().map_err(Self::lock_err)?;
        Ok(rows.values().filter(|r| matches(r)).count() as u64)
    }
}

impl<T: Record> Default for InMemoryTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory offer repository.
#[derive(Debug, Default)]
pub struct InMemoryPonudeRepository {
    table: InMemoryTable<Ponude>,
}

impl InMemoryPonudeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PonudeRepository for InMemoryPonudeRepository {
    async fn save(&self, entity: Ponude) -> Result<Ponude, StoreError> {
        self.table.save(entity)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Ponude>, StoreError> {
        self.table.get(id)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        self.table.exists(id)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        self.table.remove(id)
    }

    async fn find_all(&self, pageable: &Pageable) -> Result<Page<Ponude>, StoreError> {
        self.table.scan(|_| true, pageable)
    }

    async fn find_by_criteria(
        &self,
        criteria: &PonudeCriteria,
        pageable: &Pageable,
    ) -> Result<Page<Ponude>, StoreError> {
        // Rows are keyed by their unique id, so a distinct scan cannot
        // produce duplicates; the flag is honored by construction.
        self.table.scan(|r| criteria.matches(r), pageable)
    }

    async fn count_by_criteria(&self, criteria: &PonudeCriteria) -> Result<u64, StoreError> {
        self.table.count(|r| criteria.matches(r))
    }
}

/// In-memory procedure repository.
#[derive(Debug, Default)]
pub struct InMemoryPostupciRepository {
    table: InMemoryTable<Postupci>,
}

impl InMemoryPostupciRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostupciRepository for InMemoryPostupciRepository {
    async fn save(&self, entity: Postupci) -> Result<Postupci, StoreError> {
        self.table.save(entity)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Postupci>, StoreError> {
        self.table.get(id)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        self.table.exists(id)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        self.table.remove(id)
    }

    async fn find_all(&self, pageable: &Pageable) -> Result<Page<Postupci>, StoreError> {
        self.table.scan(|_| true, pageable)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.table.count(|_| true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortOrder;
    use tenderi_core::{Filter, RangeFilter, StringFilter};

    fn ponude(broj: Option<i32>, ime: Option<&str>) -> Ponude {
        Ponude {
            id: None,
            broj,
            ime: ime.map(str::to_owned),
        }
    }

    async fn seeded() -> InMemoryPonudeRepository {
        let repo = InMemoryPonudeRepository::new();
        for (broj, ime) in [
            (Some(1), Some("alpha")),
            (Some(2), Some("beta")),
            (Some(3), Some("gamma")),
            (None, Some("delta")),
            (Some(2), None),
        ] {
            repo.save(ponude(broj, ime)).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn save_assigns_sequential_identifiers() {
        let repo = InMemoryPonudeRepository::new();
        let first = repo.save(ponude(Some(1), None)).await.unwrap();
        let second = repo.save(ponude(Some(2), None)).await.unwrap();
        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn save_with_id_replaces_the_row() {
        let repo = InMemoryPonudeRepository::new();
        let stored = repo.save(ponude(Some(1), Some("old"))).await.unwrap();

        let mut replacement = stored.clone();
        replacement.ime = Some("new".to_owned());
        repo.save(replacement).await.unwrap();

        let found = repo.find_by_id(stored.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(found.ime.as_deref(), Some("new"));
        assert_eq!(repo.count_by_criteria(&PonudeCriteria::default()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn sequence_stays_ahead_of_explicit_ids() {
        let repo = InMemoryPonudeRepository::new();
        let seeded = Ponude {
            id: Some(10),
            ..ponude(Some(1), None)
        };
        repo.save(seeded).await.unwrap();

        let next = repo.save(ponude(Some(2), None)).await.unwrap();
        assert_eq!(next.id, Some(11));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let repo = InMemoryPonudeRepository::new();
        let stored = repo.save(ponude(Some(1), None)).await.unwrap();
        let id = stored.id.unwrap();

        repo.delete_by_id(id).await.unwrap();
        assert!(repo.find_by_id(id).await.unwrap().is_none());
        repo.delete_by_id(id).await.unwrap();
    }

    #[tokio::test]
    async fn find_all_pages_and_reports_totals() {
        let repo = seeded().await;

        let pageable = Pageable::new(Some(1), Some(2), Vec::new());
        let page = repo.find_all(&pageable).await.unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 2);
        assert!(page.has_more());
        // id order: page 1 of size 2 holds ids 3 and 4
        assert_eq!(page.items[0].id, Some(3));
        assert_eq!(page.items[1].id, Some(4));
    }

    #[tokio::test]
    async fn sorting_orders_absent_values_first() {
        let repo = seeded().await;

        let pageable = Pageable::new(None, None, vec![SortOrder::desc("broj")]);
        let page = repo.find_all(&pageable).await.unwrap();
        let brojevi: Vec<Option<i32>> = page.items.iter().map(|p| p.broj).collect();
        assert_eq!(brojevi, vec![Some(3), Some(2), Some(2), Some(1), None]);
    }

    #[tokio::test]
    async fn criteria_scan_and_count_agree() {
        let repo = seeded().await;

        let criteria = PonudeCriteria {
            broj: Some(RangeFilter {
                filter: Filter {
                    equals: Some(2),
                    ..Default::default()
                },
                ..Default::default()
            }),
            ..Default::default()
        };

        let page = repo
            .find_by_criteria(&criteria, &Pageable::default())
            .await
            .unwrap();
        let count = repo.count_by_criteria(&criteria).await.unwrap();
        assert_eq!(page.items.len() as u64, count);
        assert_eq!(count, 2);
        assert!(page.items.iter().all(|p| p.broj == Some(2)));
    }

    #[tokio::test]
    async fn specified_false_selects_absent_fields() {
        let repo = seeded().await;

        let criteria = PonudeCriteria {
            ime: Some(StringFilter {
                filter: Filter {
                    specified: Some(false),
                    ..Default::default()
                },
                ..Default::default()
            }),
            ..Default::default()
        };

        let page = repo
            .find_by_criteria(&criteria, &Pageable::default())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(page.items[0].ime.is_none());
    }
}
