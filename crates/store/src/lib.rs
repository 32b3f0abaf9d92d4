//! `tenderi-store` — persistence collaborators for the resource records.
//!
//! The repository traits are the seam between the HTTP layer and storage.
//! The in-memory implementation is the dev/test default; the Postgres
//! implementation sits behind the `postgres` feature.

mod in_memory;
pub mod query;
mod r#trait;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::{InMemoryPonudeRepository, InMemoryPostupciRepository, InMemoryTable};
pub use query::{Direction, Page, Pageable, SortOrder};
pub use r#trait::{PonudeRepository, PostupciRepository, StoreError};
