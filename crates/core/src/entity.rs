//! Persisted records: identity + scalar fields.
//!
//! The two record types are structurally identical on purpose; they are
//! distinct resources with distinct tables and route families. Wire field
//! names (`id`, `broj`, `ime`) are part of the external contract.

use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Common behavior of persisted records.
///
/// Identifiers are store-assigned; a record without one has not been
/// persisted yet.
pub trait Record: Clone + Send + Sync + 'static {
    /// Entity name used in error payloads and log fields.
    const ENTITY_NAME: &'static str;

    fn id(&self) -> Option<i64>;
    fn set_id(&mut self, id: i64);

    /// Overwrite only the fields present in `patch` (merge-patch semantics).
    /// The identifier is never touched by a merge.
    fn merge(&mut self, patch: Self);

    /// Compare two records on a named sortable property.
    ///
    /// Absent values order before present ones. Unknown properties yield
    /// `None`; callers are expected to reject those before sorting.
    fn compare_by(&self, other: &Self, property: &str) -> Option<Ordering>;
}

/// A submitted offer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ponude {
    pub id: Option<i64>,
    pub broj: Option<i32>,
    pub ime: Option<String>,
}

/// A procurement procedure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Postupci {
    pub id: Option<i64>,
    pub broj: Option<i32>,
    pub ime: Option<String>,
}

macro_rules! impl_record {
    ($t:ty, $name:literal) => {
        impl Record for $t {
            const ENTITY_NAME: &'static str = $name;

            fn id(&self) -> Option<i64> {
                self.id
            }

            fn set_id(&mut self, id: i64) {
                self.id = Some(id);
            }

            fn merge(&mut self, patch: Self) {
                if let Some(broj) = patch.broj {
                    self.broj = Some(broj);
                }
                if let Some(ime) = patch.ime {
                    self.ime = Some(ime);
                }
            }

            fn compare_by(&self, other: &Self, property: &str) -> Option<Ordering> {
                match property {
                    "id" => Some(self.id.cmp(&other.id)),
                    "broj" => Some(self.broj.cmp(&other.broj)),
                    "ime" => Some(self.ime.cmp(&other.ime)),
                    _ => None,
                }
            }
        }

        // Identity equality: records are the same record only when both carry
        // the same persisted identifier. Unsaved records equal nothing, so
        // this is deliberately PartialEq without Eq.
        impl PartialEq for $t {
            fn eq(&self, other: &Self) -> bool {
                matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
            }
        }
    };
}

impl_record!(Ponude, "ponude");
impl_record!(Postupci, "postupci");
