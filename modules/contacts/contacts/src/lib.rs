//! Contacts Module Implementation
//!
//! CRUD, search and upcoming-birthday queries over a single `contacts` table.
//! The public API is defined in `contacts-sdk` and re-exported here; the
//! REST surface is built by [`api::rest::routes::router`].

pub use contacts_sdk::{
    Contact, ContactId, ContactPatch, ContactsClientV1, ContactsError, NewContact, PageRequest,
};

pub use config::ContactsConfig;
pub use domain::local_client::LocalClient;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
