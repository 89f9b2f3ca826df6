use api_ingress::{Problem, ProblemInstance, ProblemResponse};
use axum::{extract::rejection::BytesRejection, http::StatusCode};

use crate::domain::error::DomainError;

/// Helper to create a ProblemResponse with less boilerplate
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &ProblemInstance,
) -> ProblemResponse {
    let problem = Problem::new(status, title, detail)
        .with_type(format!("https://errors.todos.local/{}", code))
        .with_code(code);
    ProblemResponse(instance.apply(problem))
}

/// Map domain error to RFC9457 ProblemResponse.
///
/// `failure_detail` is the client-facing message for store failures of the
/// current operation; the underlying error is only logged.
pub fn map_domain_error(
    e: &DomainError,
    instance: &ProblemInstance,
    failure_detail: &str,
) -> ProblemResponse {
    match e {
        DomainError::TodoNotFound { .. } => from_parts(
            StatusCode::NOT_FOUND,
            "TODOS_NOT_FOUND",
            "Not found",
            "To-do not found.",
            instance,
        ),
        DomainError::MissingTitle => from_parts(
            StatusCode::BAD_REQUEST,
            "TODOS_VALIDATION",
            "Validation error",
            "Title is required.",
            instance,
        ),
        DomainError::MissingName => from_parts(
            StatusCode::BAD_REQUEST,
            "TODOS_VALIDATION",
            "Validation error",
            "Name is required.",
            instance,
        ),
        DomainError::EmptyUpdate => from_parts(
            StatusCode::BAD_REQUEST,
            "TODOS_VALIDATION",
            "Validation error",
            "No fields provided to update.",
            instance,
        ),
        DomainError::Store { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Store error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "TODOS_STORE",
                "Internal error",
                failure_detail,
                instance,
            )
        }
    }
}

/// A JSON body that failed to deserialize; always a 400.
pub fn map_body_error(e: &serde_json::Error, instance: &ProblemInstance) -> ProblemResponse {
    from_parts(
        StatusCode::BAD_REQUEST,
        "TODOS_INVALID_BODY",
        "Bad Request",
        format!("Invalid request body: {e}"),
        instance,
    )
}

/// The body could not be read at all (e.g. over the size limit); keeps axum's status.
pub fn map_body_read_error(rejection: &BytesRejection, instance: &ProblemInstance) -> ProblemResponse {
    let status = rejection.status();
    from_parts(
        status,
        "TODOS_INVALID_BODY",
        status.canonical_reason().unwrap_or("Bad Request"),
        rejection.body_text(),
        instance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(path: &str) -> ProblemInstance {
        ProblemInstance {
            path: path.to_string(),
            request_id: Some("req-1".to_string()),
        }
    }

    #[test]
    fn store_errors_use_the_operation_detail() {
        let resp = map_domain_error(
            &DomainError::store("throughput exceeded"),
            &at("/todos"),
            "Failed to add to-do.",
        );
        assert_eq!(resp.0.status, 500);
        assert_eq!(resp.0.detail, "Failed to add to-do.");
        assert_eq!(resp.0.instance, "/todos");
        assert_eq!(resp.0.request_id.as_deref(), Some("req-1"));
    }

    #[test]
    fn not_found_detail() {
        let resp = map_domain_error(&DomainError::todo_not_found("x"), &at("/todos/x"), "unused");
        assert_eq!(resp.0.status, 404);
        assert_eq!(resp.0.detail, "To-do not found.");
        assert_eq!(resp.0.code, "TODOS_NOT_FOUND");
    }

    #[test]
    fn type_mismatch_in_body_is_a_bad_request() {
        let e = serde_json::from_str::<crate::api::rest::dto::CreateTodoReq>(r#"{"title":123}"#)
            .unwrap_err();
        let resp = map_body_error(&e, &at("/todos"));
        assert_eq!(resp.0.status, 400);
        assert_eq!(resp.0.code, "TODOS_INVALID_BODY");
    }
}
