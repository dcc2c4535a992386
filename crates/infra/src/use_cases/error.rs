use thiserror::Error;

use stackfood_core::DomainError;

use crate::repository::RepositoryError;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Use-case failure taxonomy.
///
/// Raised at the point of detection and propagated unchanged to the API
/// boundary, which owns the status-code mapping. Nothing here is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A field failed entity validation.
    #[error("{0}")]
    Validation(String),

    /// A uniqueness rule was violated (category name).
    #[error("{0}")]
    Duplicate(String),

    /// The entity the operation targets does not exist.
    #[error("{0}")]
    NotFound(String),

    /// An entity referenced by the request does not exist.
    #[error("{0}")]
    Reference(String),

    /// Storage failed for a reason the use case cannot interpret.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl CatalogError {
    pub(crate) fn duplicate_category_name(name: &str) -> Self {
        Self::Duplicate(format!("Category with name '{name}' already exists"))
    }

    pub(crate) fn category_reference(id: impl core::fmt::Display) -> Self {
        Self::Reference(format!("Category with ID {id} not found"))
    }
}

impl From<DomainError> for CatalogError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) => CatalogError::Validation(msg),
            DomainError::InvalidId(msg) => CatalogError::Validation(msg),
        }
    }
}

impl From<RepositoryError> for CatalogError {
    fn from(value: RepositoryError) -> Self {
        match value {
            // Storage constraints are the backstop for the check-then-write races.
            RepositoryError::UniqueViolation(msg) => CatalogError::Duplicate(msg),
            RepositoryError::ForeignKeyViolation(msg) => CatalogError::Reference(msg),
            RepositoryError::Storage(_) => CatalogError::Repository(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_passes_through_unprefixed() {
        let err: CatalogError = DomainError::validation("Category name cannot be empty").into();
        assert_eq!(err.to_string(), "Category name cannot be empty");
    }

    #[test]
    fn constraint_violations_become_business_errors() {
        let dup: CatalogError = RepositoryError::UniqueViolation("x".into()).into();
        let fk: CatalogError = RepositoryError::ForeignKeyViolation("y".into()).into();
        let other: CatalogError = RepositoryError::Storage("z".into()).into();

        assert!(matches!(dup, CatalogError::Duplicate(_)));
        assert!(matches!(fk, CatalogError::Reference(_)));
        assert!(matches!(other, CatalogError::Repository(_)));
    }
}
