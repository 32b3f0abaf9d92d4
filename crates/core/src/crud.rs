//! Request guards for the record lifecycle.
//!
//! Both route families run the same checks before touching the store, so the
//! checks live here rather than in each handler.

use crate::entity::Record;
use crate::error::{DomainError, DomainResult};

/// A creation payload must not carry an identifier; the store assigns one.
pub fn require_new<T: Record>(entity: &T) -> DomainResult<()> {
    if entity.id().is_some() {
        return Err(DomainError::validation(
            T::ENTITY_NAME,
            "idexists",
            format!("a new {} cannot already have an id", T::ENTITY_NAME),
        ));
    }
    Ok(())
}

/// Replace/merge payloads must address the same identifier as the path.
pub fn require_matching_id<T: Record>(path_id: i64, entity: &T) -> DomainResult<()> {
    match entity.id() {
        None => Err(DomainError::validation(
            T::ENTITY_NAME,
            "idnull",
            "missing id in request body",
        )),
        Some(body_id) if body_id != path_id => Err(DomainError::validation(
            T::ENTITY_NAME,
            "idinvalid",
            format!("body id {body_id} does not match path id {path_id}"),
        )),
        Some(_) => Ok(()),
    }
}
