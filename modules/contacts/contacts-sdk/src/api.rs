//! `ContactsClientV1` trait definition.
//!
//! This trait defines the public API for the contacts module (Version 1).

use async_trait::async_trait;

use crate::errors::ContactsError;
use crate::models::{Contact, ContactId, ContactPatch, NewContact, PageRequest};

/// Public API trait for the contacts module (Version 1).
///
/// Lookups by id return `ContactsError::NotFound` when the contact does not exist.
#[async_trait]
pub trait ContactsClientV1: Send + Sync {
    /// List contacts ordered by id.
    async fn list_contacts(&self, page: PageRequest) -> Result<Vec<Contact>, ContactsError>;

    /// Get a contact by id.
    async fn get_contact(&self, id: ContactId) -> Result<Contact, ContactsError>;

    /// Create a contact and return it as stored.
    async fn create_contact(&self, new_contact: NewContact) -> Result<Contact, ContactsError>;

    /// Apply the fields present in `patch` and return the updated contact.
    async fn update_contact(
        &self,
        id: ContactId,
        patch: ContactPatch,
    ) -> Result<Contact, ContactsError>;

    /// Delete a contact and return it as it was before deletion.
    async fn delete_contact(&self, id: ContactId) -> Result<Contact, ContactsError>;

    /// Case-insensitive substring search on first name, last name and email.
    async fn search_contacts(
        &self,
        term: &str,
        page: PageRequest,
    ) -> Result<Vec<Contact>, ContactsError>;

    /// Contacts whose birthday falls within the next `days` days, today included.
    async fn upcoming_birthdays(&self, days: u32) -> Result<Vec<Contact>, ContactsError>;
}
