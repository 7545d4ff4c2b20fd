use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use billdesk_core::DomainError;

/// Map a domain error to a consistent JSON response.
///
/// Validation failures carry the structured per-field messages so the form
/// can re-render with them preserved.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(errors) => {
            let message = errors
                .message
                .clone()
                .unwrap_or_else(|| "validation failed".to_string());
            (
                StatusCode::BAD_REQUEST,
                axum::Json(json!({
                    "error": "validation_error",
                    "message": message,
                    "errors": errors.fields,
                })),
            )
                .into_response()
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::DataAccess(message) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "database_error", message)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
