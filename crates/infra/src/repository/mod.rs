//! Catalog storage boundary.
//!
//! This module defines the repository contracts the use cases depend on, plus
//! two implementations: an in-memory store (tests/dev) and Postgres.

pub mod in_memory;
pub mod postgres;
pub mod schema;
pub mod r#trait;

pub use in_memory::{InMemoryCatalogStore, InMemoryCategoryRepository, InMemoryProductRepository};
pub use postgres::{PgCategoryRepository, PgProductRepository};
pub use r#trait::{CategoryRepository, ProductRepository, RepositoryError, RepositoryResult};
