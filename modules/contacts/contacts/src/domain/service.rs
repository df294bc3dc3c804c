use std::sync::Arc;

use contacts_sdk::{Contact, ContactId, ContactPatch, NewContact, PageRequest};

use crate::config::ContactsConfig;

use super::birthdays::BirthdayWindow;
use super::clock::Clock;
use super::error::DomainError;
use super::fields::ContactFields;
use super::repo::ContactsRepository;

const MAX_NAME_LEN: usize = 50;
const MAX_EMAIL_LEN: usize = 100;
const MAX_PHONE_LEN: usize = 20;
const MAX_NOTES_LEN: usize = 500;

// ============================================================================
// Service Configuration
// ============================================================================

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
    pub default_birthday_window_days: u32,
    pub max_birthday_window_days: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ContactsConfig::default().into()
    }
}

impl From<ContactsConfig> for ServiceConfig {
    fn from(cfg: ContactsConfig) -> Self {
        Self {
            default_page_size: cfg.default_page_size,
            max_page_size: cfg.max_page_size,
            default_birthday_window_days: cfg.default_birthday_window_days,
            max_birthday_window_days: cfg.max_birthday_window_days,
        }
    }
}

// ============================================================================
// Service Implementation
// ============================================================================

pub struct Service<R: ContactsRepository> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
    config: ServiceConfig,
}

impl<R: ContactsRepository> Service<R> {
    #[must_use]
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>, config: ServiceConfig) -> Self {
        Self {
            repo,
            clock,
            config,
        }
    }

    /// List contacts ordered by id. An out-of-range `skip` or a zero `limit`
    /// yields an empty list.
    ///
    /// # Errors
    /// `Database` on storage failure.
    pub async fn list_contacts(&self, page: PageRequest) -> Result<Vec<Contact>, DomainError> {
        let Some((skip, limit)) = self.resolve_page(page) else {
            tracing::debug!(?page, "Page window is empty");
            return Ok(Vec::new());
        };
        tracing::debug!(skip, limit, "Listing contacts");

        let contacts = self.repo.list(skip, limit).await?;
        tracing::debug!("Listed {} contacts", contacts.len());
        Ok(contacts)
    }

    /// # Errors
    /// `NotFound` if no contact has this id, `Database` on storage failure.
    pub async fn get_contact(&self, id: ContactId) -> Result<Contact, DomainError> {
        tracing::debug!(contact_id = id, "Getting contact by id");

        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(id))
    }

    /// Validate and store a new contact.
    ///
    /// # Errors
    /// `Validation` for a blank or oversized field or a malformed email,
    /// `Database` on storage failure.
    pub async fn create_contact(&self, new_contact: NewContact) -> Result<Contact, DomainError> {
        tracing::info!("Creating new contact");

        validate_name(ContactFields::FIRST_NAME, &new_contact.first_name)?;
        validate_name(ContactFields::LAST_NAME, &new_contact.last_name)?;
        validate_email(&new_contact.email)?;
        validate_optional(ContactFields::PHONE, new_contact.phone.as_deref(), MAX_PHONE_LEN)?;
        validate_optional(ContactFields::NOTES, new_contact.notes.as_deref(), MAX_NOTES_LEN)?;

        let contact = self.repo.create(new_contact).await?;
        tracing::info!("Successfully created contact with id={}", contact.id);
        Ok(contact)
    }

    /// Apply the present fields of `patch`. An empty patch returns the
    /// contact unchanged.
    ///
    /// # Errors
    /// `Validation` for an invalid present field, `NotFound` if the contact
    /// does not exist, `Database` on storage failure.
    pub async fn update_contact(
        &self,
        id: ContactId,
        patch: ContactPatch,
    ) -> Result<Contact, DomainError> {
        tracing::info!(contact_id = id, "Updating contact");

        if let Some(first_name) = &patch.first_name {
            validate_name(ContactFields::FIRST_NAME, first_name)?;
        }
        if let Some(last_name) = &patch.last_name {
            validate_name(ContactFields::LAST_NAME, last_name)?;
        }
        if let Some(email) = &patch.email {
            validate_email(email)?;
        }
        if let Some(phone) = &patch.phone {
            validate_optional(ContactFields::PHONE, phone.as_deref(), MAX_PHONE_LEN)?;
        }
        if let Some(notes) = &patch.notes {
            validate_optional(ContactFields::NOTES, notes.as_deref(), MAX_NOTES_LEN)?;
        }

        self.repo
            .update(id, patch)
            .await?
            .ok_or_else(|| DomainError::not_found(id))
    }

    /// # Errors
    /// `NotFound` if the contact does not exist, `Database` on storage failure.
    pub async fn delete_contact(&self, id: ContactId) -> Result<Contact, DomainError> {
        tracing::info!(contact_id = id, "Deleting contact");

        self.repo
            .delete(id)
            .await?
            .ok_or_else(|| DomainError::not_found(id))
    }

    /// # Errors
    /// `Validation` for a blank term, `Database` on storage failure.
    pub async fn search_contacts(
        &self,
        term: &str,
        page: PageRequest,
    ) -> Result<Vec<Contact>, DomainError> {
        if term.trim().is_empty() {
            return Err(DomainError::validation(
                ContactFields::QUERY,
                "search term must not be empty",
            ));
        }
        let Some((skip, limit)) = self.resolve_page(page) else {
            tracing::debug!(?page, "Page window is empty");
            return Ok(Vec::new());
        };
        tracing::debug!(skip, limit, "Searching contacts");

        self.repo.search(term, skip, limit).await
    }

    /// Contacts whose birthday falls in `[today, today + days]`, `days`
    /// defaulting to the configured window. See [`BirthdayWindow`] for the
    /// month-boundary rules.
    ///
    /// # Errors
    /// `Validation` if `days` exceeds the configured maximum, `Database` on
    /// storage failure.
    pub async fn upcoming_birthdays(&self, days: Option<u32>) -> Result<Vec<Contact>, DomainError> {
        let days = days.unwrap_or(self.config.default_birthday_window_days);
        if days > self.config.max_birthday_window_days {
            return Err(DomainError::validation(
                ContactFields::DAYS,
                format!(
                    "must be at most {}",
                    self.config.max_birthday_window_days
                ),
            ));
        }

        let today = self.clock.today();
        let window = BirthdayWindow::starting_at(today, days).ok_or_else(|| {
            DomainError::validation(ContactFields::DAYS, "window exceeds the supported date range")
        })?;
        tracing::debug!(%today, days, ?window, "Looking up upcoming birthdays");

        self.repo.birthdays_within(window).await
    }

    /// # Errors
    /// `Database` if the database does not answer.
    pub async fn health_check(&self) -> Result<(), DomainError> {
        self.repo.ping().await
    }

    /// Effective `(skip, limit)` window, or `None` when it cannot contain any
    /// row. A limit above the configured maximum is capped.
    fn resolve_page(&self, page: PageRequest) -> Option<(u64, u64)> {
        let skip = page.skip.unwrap_or(0);
        let limit = page
            .limit
            .unwrap_or(self.config.default_page_size)
            .min(self.config.max_page_size);

        if limit == 0 || i64::try_from(skip).is_err() {
            return None;
        }
        Some((skip, limit))
    }
}

fn validate_name(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    validate_length(field, value, MAX_NAME_LEN)
}

fn validate_email(value: &str) -> Result<(), DomainError> {
    validate_length(ContactFields::EMAIL, value, MAX_EMAIL_LEN)?;
    if !looks_like_email(value) {
        return Err(DomainError::validation(
            ContactFields::EMAIL,
            "is not a valid email address",
        ));
    }
    Ok(())
}

fn validate_optional(field: &str, value: Option<&str>, max: usize) -> Result<(), DomainError> {
    match value {
        Some(v) => validate_length(field, v, max),
        None => Ok(()),
    }
}

fn validate_length(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.chars().count() > max {
        return Err(DomainError::validation(
            field,
            format!("exceeds maximum length of {max}"),
        ));
    }
    Ok(())
}

/// `local@domain.tld` with no whitespace; deliverability is not checked.
fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
