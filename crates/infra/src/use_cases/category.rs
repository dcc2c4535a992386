//! Category use cases.
//!
//! Name uniqueness is checked here with a read before the write. The check and
//! the write are not atomic; the storage unique index is what actually holds
//! the line when two requests race, and its violation comes back as
//! `CatalogError::Duplicate` all the same.

use tracing::{info, instrument, warn};

use stackfood_catalog::Category;
use stackfood_core::CategoryId;

use crate::repository::{CategoryRepository, ProductRepository, RepositoryError};

use super::error::{CatalogError, CatalogResult};
use super::records::{CategoryRecord, CreateCategoryRequest, ProductRecord, UpdateCategoryRequest};

fn category_not_found(id: CategoryId) -> CatalogError {
    CatalogError::NotFound(format!("Category with ID '{id}' not found"))
}

/// List every category, ordered by display order (ties keep storage order).
#[derive(Debug, Clone)]
pub struct ListCategories<C> {
    categories: C,
}

impl<C: CategoryRepository> ListCategories<C> {
    pub fn new(categories: C) -> Self {
        Self { categories }
    }

    #[instrument(skip(self), err)]
    pub async fn execute(&self) -> CatalogResult<Vec<CategoryRecord>> {
        let mut records: Vec<CategoryRecord> = self
            .categories
            .get_all()
            .await?
            .iter()
            .map(CategoryRecord::from)
            .collect();
        records.sort_by_key(|r| r.display_order);
        Ok(records)
    }
}

#[derive(Debug, Clone)]
pub struct GetCategoryById<C> {
    categories: C,
}

impl<C: CategoryRepository> GetCategoryById<C> {
    pub fn new(categories: C) -> Self {
        Self { categories }
    }

    /// `Ok(None)` when no category has this id.
    #[instrument(skip(self), fields(category_id = %id), err)]
    pub async fn execute(&self, id: CategoryId) -> CatalogResult<Option<CategoryRecord>> {
        Ok(self
            .categories
            .get_by_id(id)
            .await?
            .as_ref()
            .map(CategoryRecord::from))
    }
}

#[derive(Debug, Clone)]
pub struct CreateCategory<C> {
    categories: C,
}

impl<C: CategoryRepository> CreateCategory<C> {
    pub fn new(categories: C) -> Self {
        Self { categories }
    }

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    pub async fn execute(&self, request: CreateCategoryRequest) -> CatalogResult<CategoryRecord> {
        if self.categories.get_by_name(&request.name).await?.is_some() {
            warn!("rejected duplicate category name");
            return Err(CatalogError::duplicate_category_name(&request.name));
        }

        let category = Category::new(request.name, request.description, request.display_order)?;
        let name = category.name().to_string();

        let created = self
            .categories
            .create(category)
            .await
            .map_err(|e| name_conflict(e, &name))?;

        info!(category_id = %created.id_typed(), "category created");
        Ok(CategoryRecord::from(&created))
    }
}

#[derive(Debug, Clone)]
pub struct UpdateCategory<C> {
    categories: C,
}

impl<C: CategoryRepository> UpdateCategory<C> {
    pub fn new(categories: C) -> Self {
        Self { categories }
    }

    #[instrument(skip(self, request), fields(category_id = %id, name = %request.name), err)]
    pub async fn execute(
        &self,
        id: CategoryId,
        request: UpdateCategoryRequest,
    ) -> CatalogResult<CategoryRecord> {
        let Some(mut category) = self.categories.get_by_id(id).await? else {
            warn!("category to update does not exist");
            return Err(category_not_found(id));
        };

        if let Some(holder) = self.categories.get_by_name(&request.name).await? {
            if holder.id_typed() != id {
                warn!(holder_id = %holder.id_typed(), "name already held by another category");
                return Err(CatalogError::Duplicate(format!(
                    "Another category with name '{}' already exists",
                    request.name
                )));
            }
        }

        category.update(request.name, request.description, request.display_order)?;
        let name = category.name().to_string();

        let updated = self
            .categories
            .update(category)
            .await
            .map_err(|e| name_conflict(e, &name))?;

        info!("category updated");
        Ok(CategoryRecord::from(&updated))
    }
}

#[derive(Debug, Clone)]
pub struct DeleteCategory<C> {
    categories: C,
}

impl<C: CategoryRepository> DeleteCategory<C> {
    pub fn new(categories: C) -> Self {
        Self { categories }
    }

    /// Deletes the category; storage cascades the delete to its products.
    #[instrument(skip(self), fields(category_id = %id), err)]
    pub async fn execute(&self, id: CategoryId) -> CatalogResult<()> {
        if !self.categories.exists(id).await? {
            warn!("category to delete does not exist");
            return Err(category_not_found(id));
        }

        self.categories.delete(id).await?;
        info!("category deleted");
        Ok(())
    }
}

/// Products of one category, looked up by category id.
#[derive(Debug, Clone)]
pub struct ListCategoryProducts<C, P> {
    categories: C,
    products: P,
}

impl<C: CategoryRepository, P: ProductRepository> ListCategoryProducts<C, P> {
    pub fn new(categories: C, products: P) -> Self {
        Self {
            categories,
            products,
        }
    }

    #[instrument(skip(self), fields(category_id = %id), err)]
    pub async fn execute(&self, id: CategoryId) -> CatalogResult<Vec<ProductRecord>> {
        if !self.categories.exists(id).await? {
            return Err(category_not_found(id));
        }

        Ok(self
            .products
            .get_by_category_id(id)
            .await?
            .iter()
            .map(ProductRecord::from)
            .collect())
    }
}

/// A unique violation on write means another request won the name race.
fn name_conflict(err: RepositoryError, name: &str) -> CatalogError {
    match err {
        RepositoryError::UniqueViolation(_) => CatalogError::duplicate_category_name(name),
        other => other.into(),
    }
}
