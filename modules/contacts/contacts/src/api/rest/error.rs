use axum::http::StatusCode;

use super::problem::{Problem, ValidationViolation};
use crate::domain::error::DomainError;

/// Map a domain error to an RFC 9457 problem for the request at `instance`.
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let trace_id = tracing::Span::current()
        .id()
        .map(|id| id.into_u64().to_string());

    let problem = match e {
        DomainError::NotFound { id } => Problem::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            format!("Contact not found: {id}"),
        )
        .with_code("CONTACTS_NOT_FOUND"),
        DomainError::Validation { field, message } => Problem::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Unprocessable Entity",
            format!("Validation error on '{field}': {message}"),
        )
        .with_code("CONTACTS_VALIDATION")
        .with_errors(vec![ValidationViolation {
            field: field.clone(),
            message: message.clone(),
        }]),
        DomainError::Database { .. } => {
            tracing::error!(error = ?e, "Database error occurred");
            Problem::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                "An internal database error occurred",
            )
            .with_code("CONTACTS_INTERNAL_DATABASE")
        }
    };

    let problem = problem.with_instance(instance);
    match trace_id {
        Some(id) => problem.with_trace_id(id),
        None => problem,
    }
}
