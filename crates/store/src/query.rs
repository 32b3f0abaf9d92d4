//! Pagination and sorting parameters for list queries.

use core::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tenderi_core::Record;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

/// One sort key: a record property plus a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }
}

/// Pagination parameters for list queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pageable {
    /// 0-based page index.
    pub page: u32,
    /// Maximum number of records per page.
    pub size: u32,
    /// Sort keys, applied in order. Empty means id-ascending storage order.
    pub sort: Vec<SortOrder>,
}

impl Default for Pageable {
    fn default() -> Self {
        Self {
            page: 0,
            size: 20, // Safe default
            sort: Vec::new(),
        }
    }
}

impl Pageable {
    pub fn new(page: Option<u32>, size: Option<u32>, sort: Vec<SortOrder>) -> Self {
        Self {
            page: page.unwrap_or(0),
            size: size.unwrap_or(20).clamp(1, 1000), // Cap at 1000 for safety
            sort,
        }
    }

    /// Number of records preceding this page.
    pub fn offset(&self) -> usize {
        self.page as usize * self.size as usize
    }

    /// Comparator combining the sort keys in order.
    ///
    /// Unknown properties compare equal; the boundary rejects them before a
    /// query reaches the store.
    pub fn compare<T: Record>(&self, a: &T, b: &T) -> Ordering {
        for order in &self.sort {
            let ord = a.compare_by(b, &order.property).unwrap_or(Ordering::Equal);
            let ord = match order.direction {
                Direction::Asc => ord,
                Direction::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

/// One page of results plus the total match count across all pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub pageable: Pageable,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.pageable.size.max(1) as u64)
    }

    /// Whether records exist past this page.
    pub fn has_more(&self) -> bool {
        (self.pageable.page as u64 + 1) * (self.pageable.size as u64) < self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenderi_core::Ponude;

    fn page(total: u64, page: u32, size: u32) -> Page<Ponude> {
        Page {
            items: Vec::new(),
            total,
            pageable: Pageable {
                page,
                size,
                sort: Vec::new(),
            },
        }
    }

    #[test]
    fn size_is_clamped() {
        assert_eq!(Pageable::new(None, Some(0), Vec::new()).size, 1);
        assert_eq!(Pageable::new(None, Some(5000), Vec::new()).size, 1000);
        assert_eq!(Pageable::new(None, None, Vec::new()).size, 20);
    }

    #[test]
    fn offset_is_page_times_size() {
        assert_eq!(Pageable::new(Some(3), Some(25), Vec::new()).offset(), 75);
    }

    #[test]
    fn has_more_tracks_the_page_window() {
        assert!(page(5, 0, 2).has_more());
        assert!(page(5, 1, 2).has_more());
        assert!(!page(5, 2, 2).has_more());
        assert!(!page(0, 0, 2).has_more());
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(page(5, 0, 2).total_pages(), 3);
        assert_eq!(page(4, 0, 2).total_pages(), 2);
        assert_eq!(page(0, 0, 2).total_pages(), 0);
    }

    #[test]
    fn compare_applies_keys_in_order() {
        let a = Ponude {
            id: Some(1),
            broj: Some(1),
            ime: Some("b".to_owned()),
        };
        let b = Ponude {
            id: Some(2),
            broj: Some(1),
            ime: Some("a".to_owned()),
        };

        let pageable = Pageable::new(None, None, vec![SortOrder::asc("broj"), SortOrder::desc("ime")]);
        // broj ties, ime descending puts "b" first
        assert_eq!(pageable.compare(&a, &b), Ordering::Less);
    }
}
