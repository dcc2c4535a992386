use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stackfood_infra::use_cases::{
    CreateProduct, DeleteProduct, GetProductById, ListProducts, UpdateProduct,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/category/:name", get(list_products_by_category_name))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(filter): Query<dto::ProductFilter>,
) -> axum::response::Response {
    match ListProducts::new(services.products.clone()).execute(filter).await {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(e) => errors::catalog_error_to_response(e, "Error retrieving products"),
    }
}

pub async fn list_products_by_category_name(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    let filter = dto::ProductFilter {
        category: Some(name),
        available_only: None,
    };

    match ListProducts::new(services.products.clone()).execute(filter).await {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(e) => errors::catalog_error_to_response(e, "Error retrieving products"),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match GetProductById::new(services.products.clone()).execute(id).await {
        Ok(Some(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(None) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("Product with ID {id} not found"),
        ),
        Err(e) => errors::catalog_error_to_response(e, "Error retrieving product"),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match dto::json_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let use_case = CreateProduct::new(services.categories.clone(), services.products.clone());
    match use_case.execute(body).await {
        Ok(record) => (
            StatusCode::CREATED,
            [(header::LOCATION, format!("/products/{}", record.id))],
            Json(record),
        )
            .into_response(),
        Err(e) => errors::catalog_error_to_response(e, "Error creating product"),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::UpdateProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match dto::parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let body = match dto::json_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let use_case = UpdateProduct::new(services.categories.clone(), services.products.clone());
    match use_case.execute(id, body).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => errors::product_update_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match DeleteProduct::new(services.products.clone()).execute(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::catalog_error_to_response(e, "Error deleting product"),
    }
}
