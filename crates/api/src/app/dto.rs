//! Request/response shapes at the HTTP edge.
//!
//! Bodies are the use-case transfer records; this module adds body and path
//! parsing that answers in the shared error shape.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;

use stackfood_core::{CategoryId, ProductId};

use crate::app::errors;

pub use stackfood_infra::use_cases::{
    CategoryRecord, CreateCategoryRequest, CreateProductRequest, ProductFilter, ProductRecord,
    UpdateCategoryRequest, UpdateProductRequest,
};

pub fn parse_category_id(raw: &str) -> Result<CategoryId, axum::response::Response> {
    raw.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid category id")
    })
}

pub fn parse_product_id(raw: &str) -> Result<ProductId, axum::response::Response> {
    raw.parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"))
}

/// Unwrap a JSON body. Malformed or mistyped bodies are a 400 like any other
/// validation failure.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, axum::response::Response> {
    body.map(|Json(value)| value).map_err(|rejection| {
        errors::json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.body_text())
    })
}
