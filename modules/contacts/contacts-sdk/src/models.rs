//! Public models for the contacts module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the contacts module and its consumers. REST DTOs live in the
//! module crate and convert to and from these types.

use chrono::NaiveDate;

/// Storage-assigned contact identifier.
pub type ContactId = i32;

/// A persisted contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Data for creating a new contact.
///
/// Optional fields that are `None` are stored as NULL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Partial update data for a contact.
///
/// Only fields that are `Some` are applied. For nullable columns the inner
/// option carries the new value, so `Some(None)` clears the column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    #[allow(clippy::option_option)] // Intentional: distinguish set-to-null from not-set
    pub phone: Option<Option<String>>,
    #[allow(clippy::option_option)] // Intentional: distinguish set-to-null from not-set
    pub birthday: Option<Option<NaiveDate>>,
    #[allow(clippy::option_option)] // Intentional: distinguish set-to-null from not-set
    pub notes: Option<Option<String>>,
}

impl ContactPatch {
    /// Returns `true` when no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.birthday.is_none()
            && self.notes.is_none()
    }
}

/// Offset/limit window. Missing values fall back to the module defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRequest {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl PageRequest {
    #[must_use]
    pub fn new(skip: u64, limit: u64) -> Self {
        Self {
            skip: Some(skip),
            limit: Some(limit),
        }
    }
}
