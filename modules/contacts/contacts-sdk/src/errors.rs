//! Error types for the contacts SDK.

use thiserror::Error;

use crate::models::ContactId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactsError {
    #[error("Contact not found: {id}")]
    NotFound { id: ContactId },

    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Internal error")]
    Internal,
}

impl ContactsError {
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
    pub fn internal() -> Self {
        Self::Internal
    }
}
