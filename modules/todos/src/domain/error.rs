use thiserror::Error;

use crate::contract::error::TodosError;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("To-do not found: {id}")]
    TodoNotFound { id: String },

    #[error("Title is required")]
    MissingTitle,

    #[error("Name is required")]
    MissingName,

    #[error("No fields provided to update")]
    EmptyUpdate,

    #[error("Store error: {message}")]
    Store { message: String },
}

impl DomainError {
    pub fn todo_not_found(id: impl Into<String>) -> Self {
        Self::TodoNotFound { id: id.into() }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Wrap a port failure, keeping the whole context chain.
    pub fn from_store(err: anyhow::Error) -> Self {
        Self::store(format!("{err:#}"))
    }
}

impl From<DomainError> for TodosError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::TodoNotFound { id } => Self::not_found(id),
            DomainError::MissingTitle | DomainError::MissingName | DomainError::EmptyUpdate => {
                Self::validation(domain_error.to_string())
            }
            DomainError::Store { .. } => Self::internal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_keep_the_context_chain() {
        let err = anyhow::anyhow!("connection refused").context("put_item failed");
        assert_eq!(
            DomainError::from_store(err),
            DomainError::store("put_item failed: connection refused")
        );
    }

    #[test]
    fn contract_mapping_hides_store_details() {
        let e: TodosError = DomainError::store("table missing").into();
        assert_eq!(e, TodosError::Internal);

        let e: TodosError = DomainError::todo_not_found("abc").into();
        assert_eq!(e, TodosError::not_found("abc"));

        let e: TodosError = DomainError::EmptyUpdate.into();
        assert!(matches!(e, TodosError::Validation { .. }));
    }
}
