// src/application/error.rs
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Failures surfaced by store commands and queries.
///
/// Validation and slug conflicts originate in the domain and travel through
/// the `Domain` variant; the remaining variants are decided by the use cases.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("not found: {0}")]
    NotFound(String),

    /// No acting user could be identified for a write.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The acting user is not the store's author.
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized(reason.into())
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden(reason.into())
    }

    pub fn infrastructure(detail: impl Into<String>) -> Self {
        Self::Infrastructure(detail.into())
    }
}
