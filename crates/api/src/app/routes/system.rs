use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse};
use tracing::warn;

use crate::app::errors;
use crate::app::services::AppServices;

pub async fn health(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.health().await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => {
            warn!(error = %e, "health check failed");
            errors::json_error(StatusCode::SERVICE_UNAVAILABLE, "unavailable", e.to_string())
        }
    }
}
