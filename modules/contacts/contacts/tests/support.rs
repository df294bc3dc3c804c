#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Test support utilities for `contacts` integration tests.
//!
//! Provides an in-memory database with migrations applied and a service
//! wired to a fixed clock.

#![allow(dead_code)] // Support module provides utilities that may not all be used

use std::sync::Arc;

use chrono::NaiveDate;
use contacts::domain::clock::FixedClock;
use contacts::domain::service::{Service, ServiceConfig};
use contacts::infra::storage::{DbConfig, SeaOrmContactsRepository, connect};
use contacts::NewContact;
use sea_orm::DatabaseConnection;

pub type TestService = Service<SeaOrmContactsRepository>;

pub struct TestContext {
    pub db: DatabaseConnection,
    pub service: Arc<TestService>,
}

impl TestContext {
    /// Fresh database, "today" pinned to 2024-06-10.
    pub async fn new() -> Self {
        Self::with_today(date(2024, 6, 10)).await
    }

    pub async fn with_today(today: NaiveDate) -> Self {
        let db = inmem_db().await;
        let repo = Arc::new(SeaOrmContactsRepository::new(db.clone()));
        let service = Arc::new(Service::new(
            repo,
            Arc::new(FixedClock(today)),
            ServiceConfig::default(),
        ));
        Self { db, service }
    }
}

pub async fn inmem_db() -> DatabaseConnection {
    let cfg = DbConfig {
        dsn: "sqlite::memory:".to_owned(),
        max_conns: Some(1),
        acquire_timeout_secs: None,
    };
    connect(&cfg)
        .await
        .expect("Failed to open in-memory database")
}

#[must_use]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[must_use]
pub fn new_contact(first_name: &str, last_name: &str, birthday: Option<NaiveDate>) -> NewContact {
    NewContact {
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        email: format!(
            "{}.{}@example.com",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        ),
        phone: None,
        birthday,
        notes: None,
    }
}
