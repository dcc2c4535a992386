use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use stackfood_catalog::{Category, Product};
use stackfood_core::{CategoryId, ProductId};

/// Storage operation error.
///
/// These are **infrastructure errors** as opposed to domain errors. The two
/// constraint variants are how storage reports the hard uniqueness and
/// referential guarantees that back the use cases' best-effort checks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// A unique constraint rejected the write (e.g. duplicate category name).
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A foreign key rejected the write (e.g. product points at a missing category).
    #[error("foreign key violated: {0}")]
    ForeignKeyViolation(String),

    /// Any other storage failure (connectivity, decoding, poisoned lock, ...).
    #[error("storage error: {0}")]
    Storage(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Category storage boundary.
///
/// `get_by_name` matches the name exactly (case-sensitive). `delete` of an
/// unknown id is a no-op; callers check `exists` first.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn get_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    async fn get_by_name(&self, name: &str) -> RepositoryResult<Option<Category>>;
    async fn get_all(&self) -> RepositoryResult<Vec<Category>>;
    async fn create(&self, category: Category) -> RepositoryResult<Category>;
    async fn update(&self, category: Category) -> RepositoryResult<Category>;
    async fn delete(&self, id: CategoryId) -> RepositoryResult<()>;
    async fn exists(&self, id: CategoryId) -> RepositoryResult<bool>;
}

/// Product storage boundary.
///
/// Every product returned carries its joined `category_name`.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
    async fn get_all(&self) -> RepositoryResult<Vec<Product>>;
    async fn get_by_category_id(&self, category_id: CategoryId) -> RepositoryResult<Vec<Product>>;
    async fn get_by_category_name(&self, name: &str) -> RepositoryResult<Vec<Product>>;
    async fn get_available(&self) -> RepositoryResult<Vec<Product>>;
    async fn create(&self, product: Product) -> RepositoryResult<Product>;
    async fn update(&self, product: Product) -> RepositoryResult<Product>;
    async fn delete(&self, id: ProductId) -> RepositoryResult<()>;
    async fn exists(&self, id: ProductId) -> RepositoryResult<bool>;
}

#[async_trait]
impl<S> CategoryRepository for Arc<S>
where
    S: CategoryRepository + ?Sized,
{
    async fn get_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        (**self).get_by_id(id).await
    }

    async fn get_by_name(&self, name: &str) -> RepositoryResult<Option<Category>> {
        (**self).get_by_name(name).await
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Category>> {
        (**self).get_all().await
    }

    async fn create(&self, category: Category) -> RepositoryResult<Category> {
        (**self).create(category).await
    }

    async fn update(&self, category: Category) -> RepositoryResult<Category> {
        (**self).update(category).await
    }

    async fn delete(&self, id: CategoryId) -> RepositoryResult<()> {
        (**self).delete(id).await
    }

    async fn exists(&self, id: CategoryId) -> RepositoryResult<bool> {
        (**self).exists(id).await
    }
}

#[async_trait]
impl<S> ProductRepository for Arc<S>
where
    S: ProductRepository + ?Sized,
{
    async fn get_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        (**self).get_by_id(id).await
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Product>> {
        (**self).get_all().await
    }

    async fn get_by_category_id(&self, category_id: CategoryId) -> RepositoryResult<Vec<Product>> {
        (**self).get_by_category_id(category_id).await
    }

    async fn get_by_category_name(&self, name: &str) -> RepositoryResult<Vec<Product>> {
        (**self).get_by_category_name(name).await
    }

    async fn get_available(&self) -> RepositoryResult<Vec<Product>> {
        (**self).get_available().await
    }

    async fn create(&self, product: Product) -> RepositoryResult<Product> {
        (**self).create(product).await
    }

    async fn update(&self, product: Product) -> RepositoryResult<Product> {
        (**self).update(product).await
    }

    async fn delete(&self, id: ProductId) -> RepositoryResult<()> {
        (**self).delete(id).await
    }

    async fn exists(&self, id: ProductId) -> RepositoryResult<bool> {
        (**self).exists(id).await
    }
}
