use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stackfood_infra::use_cases::{
    CreateCategory, DeleteCategory, GetCategoryById, ListCategories, ListCategoryProducts,
    UpdateCategory,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/:id/products", get(list_category_products))
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match ListCategories::new(services.categories.clone()).execute().await {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(e) => errors::catalog_error_to_response(e, "Error retrieving categories"),
    }
}

pub async fn get_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_category_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match GetCategoryById::new(services.categories.clone()).execute(id).await {
        Ok(Some(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(None) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("Category with ID '{id}' not found"),
        ),
        Err(e) => errors::catalog_error_to_response(e, "Error retrieving category"),
    }
}

pub async fn list_category_products(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_category_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let use_case = ListCategoryProducts::new(services.categories.clone(), services.products.clone());
    match use_case.execute(id).await {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(e) => errors::catalog_error_to_response(e, "Error retrieving products"),
    }
}

pub async fn create_category(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateCategoryRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match dto::json_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match CreateCategory::new(services.categories.clone()).execute(body).await {
        Ok(record) => (
            StatusCode::CREATED,
            [(header::LOCATION, format!("/categories/{}", record.id))],
            Json(record),
        )
            .into_response(),
        Err(e) => errors::catalog_error_to_response(e, "Error creating category"),
    }
}

pub async fn update_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::UpdateCategoryRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match dto::parse_category_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let body = match dto::json_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match UpdateCategory::new(services.categories.clone()).execute(id, body).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => errors::catalog_error_to_response(e, "Error updating category"),
    }
}

pub async fn delete_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_category_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match DeleteCategory::new(services.categories.clone()).execute(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::catalog_error_to_response(e, "Error deleting category"),
    }
}
