use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};

use super::{handlers, openapi};
use crate::domain::service::Service;
use crate::infra::storage::SeaOrmContactsRepository;

pub type ConcreteService = Service<SeaOrmContactsRepository>;

/// Build the contacts router.
///
/// Every endpoint except the welcome message at `/` is mounted under
/// `api_prefix`, which must start with `/`; an empty prefix (or `/`) mounts
/// them at the root.
pub fn router(service: Arc<ConcreteService>, api_prefix: &str) -> Router {
    let prefix = api_prefix.trim_end_matches('/');
    let doc = Arc::new(openapi::document(prefix));

    let api = Router::new()
        .route(
            "/contacts",
            get(handlers::list_contacts).post(handlers::create_contact),
        )
        .route("/contacts/search", get(handlers::search_contacts))
        .route("/contacts/birthdays", get(handlers::upcoming_birthdays))
        .route(
            "/contacts/{id}",
            get(handlers::get_contact)
                .put(handlers::update_contact)
                .delete(handlers::delete_contact),
        )
        .route("/healthchecker", get(handlers::healthchecker))
        .route("/openapi.json", get(handlers::openapi_json));

    let router = Router::new().route("/", get(handlers::root));
    let router = if prefix.is_empty() {
        router.merge(api)
    } else {
        router.nest(prefix, api)
    };

    tracing::debug!(api_prefix = prefix, "Contacts routes registered");
    router.layer(Extension(service)).layer(Extension(doc))
}
