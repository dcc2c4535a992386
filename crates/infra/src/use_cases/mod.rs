//! Catalog use cases.
//!
//! Each use case is a small struct over the repository traits it needs, with a
//! single `execute`. The API layer builds them per request over shared handles.

pub mod category;
pub mod error;
pub mod product;
pub mod records;

#[cfg(test)]
mod fakes;

pub use category::{
    CreateCategory, DeleteCategory, GetCategoryById, ListCategories, ListCategoryProducts,
    UpdateCategory,
};
pub use error::{CatalogError, CatalogResult};
pub use product::{CreateProduct, DeleteProduct, GetProductById, ListProducts, UpdateProduct};
pub use records::{
    CategoryRecord, CreateCategoryRequest, CreateProductRequest, ProductFilter, ProductRecord,
    UpdateCategoryRequest, UpdateProductRequest,
};
