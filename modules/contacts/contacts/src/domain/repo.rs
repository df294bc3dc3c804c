use async_trait::async_trait;
use contacts_sdk::{Contact, ContactId, ContactPatch, NewContact};

use super::birthdays::BirthdayWindow;
use super::error::DomainError;

/// Persistence operations for contacts.
///
/// Lookups by id report absence as `Ok(None)`; the service decides whether
/// that is an error. List-style queries are ordered by id.
#[async_trait]
pub trait ContactsRepository: Send + Sync {
    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<Contact>, DomainError>;

    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, DomainError>;

    /// Insert a contact and return the row as stored.
    async fn create(&self, new_contact: NewContact) -> Result<Contact, DomainError>;

    /// Apply the present fields of `patch`. Returns `None` if `id` does not exist.
    async fn update(
        &self,
        id: ContactId,
        patch: ContactPatch,
    ) -> Result<Option<Contact>, DomainError>;

    /// Remove a contact, returning it as it was before deletion.
    async fn delete(&self, id: ContactId) -> Result<Option<Contact>, DomainError>;

    /// Case-insensitive substring match on first name, last name or email.
    async fn search(&self, term: &str, skip: u64, limit: u64)
        -> Result<Vec<Contact>, DomainError>;

    /// Contacts with a birthday inside `window`. Contacts without a birthday never match.
    async fn birthdays_within(&self, window: BirthdayWindow)
        -> Result<Vec<Contact>, DomainError>;

    /// Round-trip a trivial query to the database.
    async fn ping(&self) -> Result<(), DomainError>;
}
