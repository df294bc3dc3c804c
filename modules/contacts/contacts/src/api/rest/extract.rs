//! Body and query extractors whose rejections are problem documents.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, OriginalUri, Path, Query, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::problem::Problem;

/// JSON body extractor.
///
/// Malformed JSON syntax is a 400, a missing `application/json` content type
/// a 415, and a body that does not fit the target type a 422.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let instance = req
            .extensions()
            .get::<OriginalUri>()
            .map_or_else(|| req.uri().path(), |original| original.path())
            .to_owned();
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection_to_problem(&rejection, &instance)),
        }
    }
}

/// Query string extractor; any deserialization failure is a 422.
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(query_rejection_to_problem(&rejection, request_path(parts))),
        }
    }
}

/// Path parameter extractor; a segment that does not parse is a 422.
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(path_rejection_to_problem(&rejection, request_path(parts))),
        }
    }
}

/// Path as the client sent it, before any `nest` prefix was stripped.
fn request_path(parts: &Parts) -> &str {
    parts
        .extensions
        .get::<OriginalUri>()
        .map_or_else(|| parts.uri.path(), |original| original.path())
}

fn json_rejection_to_problem(rejection: &JsonRejection, instance: &str) -> Problem {
    let status = rejection.status();
    let (title, code) = match status {
        StatusCode::UNPROCESSABLE_ENTITY => ("Unprocessable Entity", "CONTACTS_VALIDATION"),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => {
            ("Unsupported Media Type", "CONTACTS_UNSUPPORTED_MEDIA_TYPE")
        }
        StatusCode::PAYLOAD_TOO_LARGE => ("Payload Too Large", "CONTACTS_PAYLOAD_TOO_LARGE"),
        _ => ("Bad Request", "CONTACTS_BAD_REQUEST"),
    };
    tracing::debug!(%status, error = %rejection.body_text(), "Rejected request body");

    Problem::new(status, title, rejection.body_text())
        .with_code(code)
        .with_instance(instance)
}

fn query_rejection_to_problem(rejection: &QueryRejection, instance: &str) -> Problem {
    tracing::debug!(error = %rejection.body_text(), "Rejected query string");

    Problem::new(
        StatusCode::UNPROCESSABLE_ENTITY,
        "Unprocessable Entity",
        rejection.body_text(),
    )
    .with_code("CONTACTS_VALIDATION")
    .with_instance(instance)
}

fn path_rejection_to_problem(rejection: &PathRejection, instance: &str) -> Problem {
    let status = rejection.status();
    if status.is_server_error() {
        tracing::error!(error = %rejection.body_text(), "Path parameters unavailable");
        return Problem::new(status, "Internal Server Error", "An internal error occurred")
            .with_code("CONTACTS_INTERNAL")
            .with_instance(instance);
    }

    Problem::new(
        StatusCode::UNPROCESSABLE_ENTITY,
        "Unprocessable Entity",
        rejection.body_text(),
    )
    .with_code("CONTACTS_VALIDATION")
    .with_instance(instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Named {
        #[allow(dead_code)]
        name: String,
    }

    fn json_request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = HttpRequest::builder().method("POST").uri("/api/contacts");
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn json_syntax_error_is_400() {
        let req = json_request(Some("application/json"), "{not json");
        let err = ApiJson::<Named>::from_request(req, &()).await.unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.instance, "/api/contacts");
    }

    #[tokio::test]
    async fn json_type_mismatch_is_422() {
        let req = json_request(Some("application/json"), r#"{"name": 5}"#);
        let err = ApiJson::<Named>::from_request(req, &()).await.unwrap_err();

        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code, "CONTACTS_VALIDATION");
    }

    #[tokio::test]
    async fn missing_content_type_is_415() {
        let req = json_request(None, r#"{"name": "x"}"#);
        let err = ApiJson::<Named>::from_request(req, &()).await.unwrap_err();

        assert_eq!(err.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn bad_query_is_422() {
        #[derive(Debug, Deserialize)]
        struct Q {
            #[allow(dead_code)]
            limit: Option<u64>,
        }

        let req = HttpRequest::builder()
            .uri("/api/contacts?limit=-1")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = req.into_parts();
        let err = ApiQuery::<Q>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.instance, "/api/contacts");
    }
}
