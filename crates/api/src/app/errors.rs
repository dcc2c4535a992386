use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use tracing::error;

use stackfood_infra::use_cases::CatalogError;

/// Map a use-case failure to a response. `operation` prefixes the message of
/// unexpected (500) failures, e.g. "Error creating product".
pub fn catalog_error_to_response(err: CatalogError, operation: &'static str) -> axum::response::Response {
    match err {
        CatalogError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        CatalogError::Duplicate(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        CatalogError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
        CatalogError::Reference(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_reference", msg),
        CatalogError::Repository(e) => {
            error!(error = %e, operation, "unhandled catalog failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                format!("{operation}: {e}"),
            )
        }
    }
}

/// Product updates answer every business rejection with 404, including a
/// failed validation and a missing category. Clients depend on it.
pub fn product_update_error_to_response(err: CatalogError) -> axum::response::Response {
    match err {
        CatalogError::Validation(msg) | CatalogError::Reference(msg) | CatalogError::NotFound(msg) => {
            json_error(StatusCode::NOT_FOUND, "not_found", msg)
        }
        other => catalog_error_to_response(other, "Error updating product"),
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
