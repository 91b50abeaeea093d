//! Domain error model.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Repository operations report absence and duplication as plain `bool` /
/// `Option` outcomes. This type is for callers that want a reason attached,
/// e.g. the validated create/update paths.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Caller-supplied data failed one or more domain constraints.
    #[error(transparent)]
    Validation(ValidationErrors),

    /// A record with the same key already exists.
    #[error("duplicate key: {0}")]
    Duplicate(String),

    /// No record matches the given key.
    #[error("not found: {0}")]
    NotFound(String),
}

impl DomainError {
    pub fn duplicate(key: impl Into<String>) -> Self {
        Self::Duplicate(key.into())
    }

    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound(key.into())
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}
