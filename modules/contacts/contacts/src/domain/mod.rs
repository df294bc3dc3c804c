pub mod birthdays;
pub mod clock;
pub mod error;
pub mod fields;
pub mod local_client;
pub mod repo;
pub mod service;
