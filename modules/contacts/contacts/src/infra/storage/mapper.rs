use contacts_sdk::Contact;

use super::entity;

impl From<entity::Model> for Contact {
    fn from(entity: entity::Model) -> Self {
        Self {
            id: entity.id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            email: entity.email,
            phone: entity.phone,
            birthday: entity.birthday,
            notes: entity.notes,
        }
    }
}
