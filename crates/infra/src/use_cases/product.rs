//! Product use cases.

use tracing::{info, instrument, warn};

use stackfood_catalog::{Product, ProductDetails};
use stackfood_core::{CategoryId, Money, ProductId};

use crate::repository::{CategoryRepository, ProductRepository, RepositoryError};

use super::error::{CatalogError, CatalogResult};
use super::records::{CreateProductRequest, ProductFilter, ProductRecord, UpdateProductRequest};

fn product_not_found(id: ProductId) -> CatalogError {
    CatalogError::NotFound(format!("Product with ID {id} not found"))
}

/// A foreign-key violation on write means the category vanished after the check.
fn category_conflict(err: RepositoryError, category_id: CategoryId) -> CatalogError {
    match err {
        RepositoryError::ForeignKeyViolation(_) => CatalogError::category_reference(category_id),
        other => other.into(),
    }
}

fn records(products: Vec<Product>) -> Vec<ProductRecord> {
    products.iter().map(ProductRecord::from).collect()
}

#[derive(Debug, Clone)]
pub struct ListProducts<P> {
    products: P,
}

impl<P: ProductRepository> ListProducts<P> {
    pub fn new(products: P) -> Self {
        Self { products }
    }

    /// A non-blank category name wins; otherwise `available_only == Some(true)`
    /// narrows to available products; otherwise everything.
    #[instrument(skip(self), err)]
    pub async fn execute(&self, filter: ProductFilter) -> CatalogResult<Vec<ProductRecord>> {
        let products = match filter.category.as_deref().filter(|c| !c.trim().is_empty()) {
            Some(category) => self.products.get_by_category_name(category).await?,
            None if filter.available_only == Some(true) => self.products.get_available().await?,
            None => self.products.get_all().await?,
        };
        Ok(records(products))
    }
}

#[derive(Debug, Clone)]
pub struct GetProductById<P> {
    products: P,
}

impl<P: ProductRepository> GetProductById<P> {
    pub fn new(products: P) -> Self {
        Self { products }
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    pub async fn execute(&self, id: ProductId) -> CatalogResult<Option<ProductRecord>> {
        Ok(self
            .products
            .get_by_id(id)
            .await?
            .as_ref()
            .map(ProductRecord::from))
    }
}

#[derive(Debug, Clone)]
pub struct CreateProduct<C, P> {
    categories: C,
    products: P,
}

impl<C: CategoryRepository, P: ProductRepository> CreateProduct<C, P> {
    pub fn new(categories: C, products: P) -> Self {
        Self {
            categories,
            products,
        }
    }

    #[instrument(skip(self, request), fields(category_id = %request.category_id, name = %request.name), err)]
    pub async fn execute(&self, request: CreateProductRequest) -> CatalogResult<ProductRecord> {
        let category_id = request.category_id;
        if !self.categories.exists(category_id).await? {
            warn!("product references a missing category");
            return Err(CatalogError::category_reference(category_id));
        }

        let price = request.price.map(Money::new).transpose()?;
        let product = Product::new(
            ProductDetails {
                category_id,
                name: request.name,
                description: request.description,
                price,
                image_url: None,
            },
            request.is_available,
        )?;

        let created = self
            .products
            .create(product)
            .await
            .map_err(|e| category_conflict(e, category_id))?;

        info!(product_id = %created.id_typed(), "product created");
        Ok(ProductRecord::from(&created))
    }
}

#[derive(Debug, Clone)]
pub struct UpdateProduct<C, P> {
    categories: C,
    products: P,
}

impl<C: CategoryRepository, P: ProductRepository> UpdateProduct<C, P> {
    pub fn new(categories: C, products: P) -> Self {
        Self {
            categories,
            products,
        }
    }

    /// Replaces name, description, price, category and image url. Availability
    /// is left as stored.
    #[instrument(skip(self, request), fields(product_id = %id, category_id = %request.category_id), err)]
    pub async fn execute(
        &self,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> CatalogResult<ProductRecord> {
        let Some(mut product) = self.products.get_by_id(id).await? else {
            warn!("product to update does not exist");
            return Err(product_not_found(id));
        };

        let category_id = request.category_id;
        if !self.categories.exists(category_id).await? {
            warn!("product update references a missing category");
            return Err(CatalogError::category_reference(category_id));
        }

        let price = request.price.map(Money::new).transpose()?;
        product.update(ProductDetails {
            category_id,
            name: request.name,
            description: request.description,
            price,
            image_url: request.image_url,
        })?;

        let updated = self
            .products
            .update(product)
            .await
            .map_err(|e| category_conflict(e, category_id))?;

        info!("product updated");
        Ok(ProductRecord::from(&updated))
    }
}

#[derive(Debug, Clone)]
pub struct DeleteProduct<P> {
    products: P,
}

impl<P: ProductRepository> DeleteProduct<P> {
    pub fn new(products: P) -> Self {
        Self { products }
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    pub async fn execute(&self, id: ProductId) -> CatalogResult<()> {
        if !self.products.exists(id).await? {
            warn!("product to delete does not exist");
            return Err(product_not_found(id));
        }

        self.products.delete(id).await?;
        info!("product deleted");
        Ok(())
    }
}
