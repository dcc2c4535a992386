//! Catalog domain module.
//!
//! This crate contains the business rules for categories and products,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).
//! Entities validate their own fields; rules that need a query (name
//! uniqueness, category references) belong to the use cases in `stackfood-infra`.

pub mod category;
pub mod product;

pub use category::{Category, CATEGORY_NAME_MAX_LEN};
pub use product::{Product, ProductDetails, PRODUCT_NAME_MAX_LEN};
