use chrono::NaiveDate;
use contacts_sdk::{Contact, ContactId, ContactPatch, NewContact, PageRequest};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

/// REST DTO for contact representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactDto {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Calendar date, `YYYY-MM-DD`.
    pub birthday: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// REST DTO for creating a contact
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateContactReq {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// REST DTO for updating a contact (partial).
///
/// Absent fields are left untouched. On the nullable fields an explicit
/// `null` clears the stored value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateContactReq {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[allow(clippy::option_option)] // Intentional: distinguish set-to-null from not-set
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub phone: Option<Option<String>>,
    #[allow(clippy::option_option)] // Intentional: distinguish set-to-null from not-set
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<NaiveDate>)]
    pub birthday: Option<Option<NaiveDate>>,
    #[allow(clippy::option_option)] // Intentional: distinguish set-to-null from not-set
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

/// Only called when the key is present, so `null` becomes `Some(None)`.
#[allow(clippy::option_option)]
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Offset pagination parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Number of contacts to skip (default 0)
    pub skip: Option<i64>,
    /// Maximum number of contacts to return (default 10, capped at the configured maximum)
    pub limit: Option<i64>,
}

/// Search parameters
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring matched against first name, last name and email
    pub q: String,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// Upcoming birthdays parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BirthdaysQuery {
    /// Window length in days, today included (default 7)
    pub days: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    #[must_use]
    pub fn welcome() -> Self {
        Self {
            message: "Welcome to the Contacts API!".to_owned(),
        }
    }
}

// Conversion implementations between REST DTOs and contract models
impl From<Contact> for ContactDto {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
            birthday: contact.birthday,
            notes: contact.notes,
        }
    }
}

impl From<CreateContactReq> for NewContact {
    fn from(req: CreateContactReq) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            birthday: req.birthday,
            notes: req.notes,
        }
    }
}

impl From<UpdateContactReq> for ContactPatch {
    fn from(req: UpdateContactReq) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            birthday: req.birthday,
            notes: req.notes,
        }
    }
}

/// A negative `skip` or `limit` selects nothing, so it becomes an empty window.
impl From<PageQuery> for PageRequest {
    fn from(q: PageQuery) -> Self {
        let skip = q.skip.map(u64::try_from).transpose();
        let limit = q.limit.map(u64::try_from).transpose();
        match (skip, limit) {
            (Ok(skip), Ok(limit)) => Self { skip, limit },
            _ => Self::new(0, 0),
        }
    }
}
