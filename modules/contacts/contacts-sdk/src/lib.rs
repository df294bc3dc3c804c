//! Contacts SDK
//!
//! This crate provides the public API for the contacts module:
//! - `ContactsClientV1` trait for in-process consumers
//! - Model types (`Contact`, `NewContact`, `ContactPatch`, `PageRequest`)
//! - Error type (`ContactsError`)

#![forbid(unsafe_code)]

pub mod api;
pub mod errors;
pub mod models;

pub use api::ContactsClientV1;
pub use errors::ContactsError;
pub use models::{Contact, ContactId, ContactPatch, NewContact, PageRequest};
