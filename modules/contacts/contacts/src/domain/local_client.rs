use async_trait::async_trait;
use contacts_sdk::{
    Contact, ContactId, ContactPatch, ContactsClientV1, ContactsError, NewContact, PageRequest,
};
use std::sync::Arc;

use crate::domain::repo::ContactsRepository;
use crate::domain::service::Service;

/// In-process `ContactsClientV1` backed by the domain service.
pub struct LocalClient<R: ContactsRepository + 'static> {
    service: Arc<Service<R>>,
}

impl<R: ContactsRepository + 'static> LocalClient<R> {
    #[must_use]
    pub fn new(service: Arc<Service<R>>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R: ContactsRepository + 'static> ContactsClientV1 for LocalClient<R> {
    async fn list_contacts(&self, page: PageRequest) -> Result<Vec<Contact>, ContactsError> {
        self.service.list_contacts(page).await.map_err(Into::into)
    }

    async fn get_contact(&self, id: ContactId) -> Result<Contact, ContactsError> {
        self.service.get_contact(id).await.map_err(Into::into)
    }

    async fn create_contact(&self, new_contact: NewContact) -> Result<Contact, ContactsError> {
        self.service
            .create_contact(new_contact)
            .await
            .map_err(Into::into)
    }

    async fn update_contact(
        &self,
        id: ContactId,
        patch: ContactPatch,
    ) -> Result<Contact, ContactsError> {
        self.service
            .update_contact(id, patch)
            .await
            .map_err(Into::into)
    }

    async fn delete_contact(&self, id: ContactId) -> Result<Contact, ContactsError> {
        self.service.delete_contact(id).await.map_err(Into::into)
    }

    async fn search_contacts(
        &self,
        term: &str,
        page: PageRequest,
    ) -> Result<Vec<Contact>, ContactsError> {
        self.service
            .search_contacts(term, page)
            .await
            .map_err(Into::into)
    }

    async fn upcoming_birthdays(&self, days: u32) -> Result<Vec<Contact>, ContactsError> {
        self.service
            .upcoming_birthdays(Some(days))
            .await
            .map_err(Into::into)
    }
}
