use std::sync::Arc;

use axum::extract::OriginalUri;
use axum::http::{StatusCode, Uri, header};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use contacts_sdk::ContactId;
use tracing::info;

use super::dto::{
    BirthdaysQuery, ContactDto, CreateContactReq, MessageDto, PageQuery, SearchQuery,
    UpdateContactReq,
};
use super::error::domain_error_to_problem;
use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::problem::Problem;
use super::routes::ConcreteService;
use crate::domain::error::DomainError;

pub type ApiResult<T> = Result<T, Problem>;

fn to_problem(uri: &Uri) -> impl FnOnce(DomainError) -> Problem + '_ {
    move |e| domain_error_to_problem(&e, uri.path())
}

/// List contacts ordered by id
#[utoipa::path(
    get,
    path = "/contacts",
    tag = "contacts",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of contacts", body = Vec<ContactDto>),
        (status = 422, description = "Invalid pagination", body = Problem, content_type = "application/problem+json"),
    )
)]
#[tracing::instrument(skip_all, fields(skip = query.skip, limit = query.limit))]
pub async fn list_contacts(
    OriginalUri(uri): OriginalUri,
    Extension(svc): Extension<Arc<ConcreteService>>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResult<Json<Vec<ContactDto>>> {
    let contacts = svc
        .list_contacts(query.into())
        .await
        .map_err(to_problem(&uri))?;
    Ok(Json(contacts.into_iter().map(ContactDto::from).collect()))
}

/// Get a single contact
#[utoipa::path(
    get,
    path = "/contacts/{id}",
    tag = "contacts",
    params(("id" = i32, Path, description = "Contact id")),
    responses(
        (status = 200, description = "The contact", body = ContactDto),
        (status = 404, description = "No contact with this id", body = Problem, content_type = "application/problem+json"),
    )
)]
#[tracing::instrument(skip_all, fields(contact.id = id))]
pub async fn get_contact(
    OriginalUri(uri): OriginalUri,
    Extension(svc): Extension<Arc<ConcreteService>>,
    ApiPath(id): ApiPath<ContactId>,
) -> ApiResult<Json<ContactDto>> {
    let contact = svc.get_contact(id).await.map_err(to_problem(&uri))?;
    Ok(Json(contact.into()))
}

/// Create a contact
#[utoipa::path(
    post,
    path = "/contacts",
    tag = "contacts",
    request_body = CreateContactReq,
    responses(
        (status = 201, description = "Contact created", body = ContactDto),
        (status = 400, description = "Malformed JSON", body = Problem, content_type = "application/problem+json"),
        (status = 422, description = "Validation failed", body = Problem, content_type = "application/problem+json"),
    )
)]
#[tracing::instrument(skip_all, fields(contact.email = %req_body.email))]
pub async fn create_contact(
    OriginalUri(uri): OriginalUri,
    Extension(svc): Extension<Arc<ConcreteService>>,
    ApiJson(req_body): ApiJson<CreateContactReq>,
) -> ApiResult<impl IntoResponse> {
    let contact = svc
        .create_contact(req_body.into())
        .await
        .map_err(to_problem(&uri))?;
    info!(contact.id = contact.id, "Contact created");

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), contact.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ContactDto::from(contact)),
    ))
}

/// Partially update a contact
#[utoipa::path(
    put,
    path = "/contacts/{id}",
    tag = "contacts",
    params(("id" = i32, Path, description = "Contact id")),
    request_body = UpdateContactReq,
    responses(
        (status = 200, description = "Updated contact", body = ContactDto),
        (status = 404, description = "No contact with this id", body = Problem, content_type = "application/problem+json"),
        (status = 422, description = "Validation failed", body = Problem, content_type = "application/problem+json"),
    )
)]
#[tracing::instrument(skip_all, fields(contact.id = id))]
pub async fn update_contact(
    OriginalUri(uri): OriginalUri,
    Extension(svc): Extension<Arc<ConcreteService>>,
    ApiPath(id): ApiPath<ContactId>,
    ApiJson(req_body): ApiJson<UpdateContactReq>,
) -> ApiResult<Json<ContactDto>> {
    let contact = svc
        .update_contact(id, req_body.into())
        .await
        .map_err(to_problem(&uri))?;
    Ok(Json(contact.into()))
}

/// Delete a contact and return it as it was
#[utoipa::path(
    delete,
    path = "/contacts/{id}",
    tag = "contacts",
    params(("id" = i32, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Deleted contact", body = ContactDto),
        (status = 404, description = "No contact with this id", body = Problem, content_type = "application/problem+json"),
    )
)]
#[tracing::instrument(skip_all, fields(contact.id = id))]
pub async fn delete_contact(
    OriginalUri(uri): OriginalUri,
    Extension(svc): Extension<Arc<ConcreteService>>,
    ApiPath(id): ApiPath<ContactId>,
) -> ApiResult<Json<ContactDto>> {
    let contact = svc.delete_contact(id).await.map_err(to_problem(&uri))?;
    info!("Contact deleted");
    Ok(Json(contact.into()))
}

/// Search contacts by first name, last name or email
#[utoipa::path(
    get,
    path = "/contacts/search",
    tag = "contacts",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching contacts", body = Vec<ContactDto>),
        (status = 422, description = "Missing or blank query", body = Problem, content_type = "application/problem+json"),
    )
)]
#[tracing::instrument(skip_all, fields(skip = query.skip, limit = query.limit))]
pub async fn search_contacts(
    OriginalUri(uri): OriginalUri,
    Extension(svc): Extension<Arc<ConcreteService>>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> ApiResult<Json<Vec<ContactDto>>> {
    let page = PageQuery {
        skip: query.skip,
        limit: query.limit,
    };
    let contacts = svc
        .search_contacts(&query.q, page.into())
        .await
        .map_err(to_problem(&uri))?;
    Ok(Json(contacts.into_iter().map(ContactDto::from).collect()))
}

/// Contacts with a birthday in the next `days` days
#[utoipa::path(
    get,
    path = "/contacts/birthdays",
    tag = "contacts",
    params(BirthdaysQuery),
    responses(
        (status = 200, description = "Contacts with upcoming birthdays", body = Vec<ContactDto>),
        (status = 422, description = "Invalid window", body = Problem, content_type = "application/problem+json"),
    )
)]
#[tracing::instrument(skip_all, fields(days = query.days))]
pub async fn upcoming_birthdays(
    OriginalUri(uri): OriginalUri,
    Extension(svc): Extension<Arc<ConcreteService>>,
    ApiQuery(query): ApiQuery<BirthdaysQuery>,
) -> ApiResult<Json<Vec<ContactDto>>> {
    let contacts = svc
        .upcoming_birthdays(query.days)
        .await
        .map_err(to_problem(&uri))?;
    Ok(Json(contacts.into_iter().map(ContactDto::from).collect()))
}

/// Database connectivity probe
#[utoipa::path(
    get,
    path = "/healthchecker",
    tag = "health",
    responses(
        (status = 200, description = "Database reachable", body = MessageDto),
        (status = 500, description = "Database unreachable", body = Problem, content_type = "application/problem+json"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn healthchecker(
    OriginalUri(uri): OriginalUri,
    Extension(svc): Extension<Arc<ConcreteService>>,
) -> ApiResult<Json<MessageDto>> {
    match svc.health_check().await {
        Ok(()) => Ok(Json(MessageDto::welcome())),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            Err(Problem::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                "Database is not configured correctly",
            )
            .with_code("CONTACTS_DATABASE_UNAVAILABLE")
            .with_instance(uri.path()))
        }
    }
}

/// Welcome message served at `/`.
#[allow(clippy::unused_async)]
pub async fn root() -> Json<MessageDto> {
    Json(MessageDto::welcome())
}

#[allow(clippy::unused_async)]
pub async fn openapi_json(
    Extension(doc): Extension<Arc<utoipa::openapi::OpenApi>>,
) -> Json<utoipa::openapi::OpenApi> {
    Json(doc.as_ref().clone())
}
