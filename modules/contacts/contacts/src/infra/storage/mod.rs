//! Infrastructure storage layer: database connection, entity, migrations and
//! the SeaORM-backed `ContactsRepository`.
//!
//! All SeaORM-specific code lives here. The domain layer only sees the
//! `ContactsRepository` trait and the SDK model types.

pub mod db;
pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod sea_orm_repo;

pub use db::{DbConfig, connect};
pub use sea_orm_repo::SeaOrmContactsRepository;
