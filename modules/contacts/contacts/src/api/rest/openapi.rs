use utoipa::OpenApi;

use super::dto::{ContactDto, CreateContactReq, MessageDto, UpdateContactReq};
use super::handlers;
use super::problem::{Problem, ValidationViolation};

#[derive(OpenApi)]
#[openapi(
    info(title = "Contacts API", description = "Contacts with search and upcoming birthdays"),
    paths(
        handlers::list_contacts,
        handlers::create_contact,
        handlers::get_contact,
        handlers::update_contact,
        handlers::delete_contact,
        handlers::search_contacts,
        handlers::upcoming_birthdays,
        handlers::healthchecker,
    ),
    components(schemas(
        ContactDto,
        CreateContactReq,
        UpdateContactReq,
        MessageDto,
        Problem,
        ValidationViolation,
    )),
    tags(
        (name = "contacts", description = "Contact management"),
        (name = "health", description = "Service health"),
    )
)]
struct ContactsApiDoc;

/// OpenAPI document with every path mounted under `prefix`.
#[must_use]
pub fn document(prefix: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ContactsApiDoc::openapi();
    let paths = std::mem::take(&mut doc.paths.paths);
    doc.paths.paths = paths
        .into_iter()
        .map(|(path, item)| (format!("{prefix}{path}"), item))
        .collect();
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_carry_the_api_prefix() {
        let doc = document("/api");
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/api/contacts"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/contacts/{id}"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/contacts/birthdays"));
        assert!(paths.iter().all(|p| p.starts_with("/api/")));
    }

    #[test]
    fn contact_schema_is_registered() {
        let json = serde_json::to_value(document("")).unwrap();
        assert!(json["components"]["schemas"]["ContactDto"].is_object());
        assert!(json["paths"]["/contacts/search"]["get"].is_object());
    }
}
