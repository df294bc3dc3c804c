use contacts_sdk::{ContactId, ContactsError};
use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Contact not found: {id}")]
    NotFound { id: ContactId },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    #[must_use]
    pub fn not_found(id: ContactId) -> Self {
        Self::NotFound { id }
    }

    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for ContactsError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::NotFound { id } => ContactsError::not_found(id),
            DomainError::Validation { field, message } => ContactsError::validation(field, message),
            DomainError::Database { .. } => ContactsError::internal(),
        }
    }
}
