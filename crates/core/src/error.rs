//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic request failures (malformed payloads,
/// missing identifiers). Infrastructure concerns belong elsewhere.
///
/// Every variant carries the entity name and a stable error key so clients
/// can branch on the failure kind instead of parsing free text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The request is malformed or contradicts the addressed resource.
    #[error("{message}")]
    Validation {
        entity: &'static str,
        key: &'static str,
        message: String,
    },

    /// The referenced identifier does not exist.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },
}

impl DomainError {
    pub fn validation(entity: &'static str, key: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            entity,
            key,
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    /// Stable error key reported to clients.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Validation { key, .. } => key,
            Self::NotFound { .. } => "idnotfound",
        }
    }

    /// Entity the failure refers to.
    pub fn entity(&self) -> &'static str {
        match self {
            Self::Validation { entity, .. } => entity,
            Self::NotFound { entity } => entity,
        }
    }
}
