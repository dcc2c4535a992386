//! Transfer records: the request and response shapes at the API boundary.
//!
//! JSON keys are camelCase. Request fields default the way the public API
//! always has (missing name → empty, missing availability → `true`), so an
//! incomplete body reaches entity validation instead of failing to parse.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stackfood_catalog::{Category, Product};
use stackfood_core::{CategoryId, Entity, ProductId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub display_order: i32,
}

impl From<&Category> for CategoryRecord {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id_typed(),
            name: category.name().to_string(),
            description: category.description().map(str::to_string),
            display_order: category.display_order(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: ProductId,
    pub category_id: CategoryId,
    /// Empty when the category relation was not loaded.
    pub category_name: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id_typed(),
            category_id: product.category_id(),
            category_name: product.category_name().unwrap_or_default().to_string(),
            name: product.name().to_string(),
            description: product.description().map(str::to_string),
            price: product.price().amount(),
            image_url: product.image_url().map(str::to_string),
            is_available: product.is_available(),
            created_at: product.created_at(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
    pub display_order: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
    pub display_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[serde(default = "CategoryId::nil")]
    pub category_id: CategoryId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default = "available_by_default")]
    pub is_available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(default = "CategoryId::nil")]
    pub category_id: CategoryId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn available_by_default() -> bool {
    true
}

/// Product listing filter. A non-blank `category` wins over `available_only`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
    #[serde(rename = "available")]
    pub available_only: Option<bool>,
}
