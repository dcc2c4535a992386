use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use stackfood_catalog::{Category, Product};
use stackfood_core::{CategoryId, Entity, ProductId};

use super::r#trait::{CategoryRepository, ProductRepository, RepositoryError, RepositoryResult};

#[derive(Debug, Default)]
struct Tables {
    categories: HashMap<CategoryId, Category>,
    products: HashMap<ProductId, Product>,
}

impl Tables {
    fn name_taken_by_other(&self, name: &str, id: CategoryId) -> bool {
        self.categories
            .values()
            .any(|c| c.name() == name && c.id_typed() != id)
    }

    /// Product as a read would return it: joined with its category's name.
    fn joined(&self, product: &Product) -> Product {
        let name = self
            .categories
            .get(&product.category_id())
            .map(|c| c.name().to_string());
        product.clone().with_category_name(name)
    }

    fn select<F>(&self, predicate: F) -> Vec<Product>
    where
        F: Fn(&Product) -> bool,
    {
        let mut rows: Vec<Product> = self
            .products
            .values()
            .filter(|p| predicate(p))
            .map(|p| self.joined(p))
            .collect();
        rows.sort_by_key(|p| (p.created_at(), p.id_typed()));
        rows
    }
}

/// In-memory catalog storage for tests/dev.
///
/// Both tables live behind one lock so the category handle and the product
/// handle observe the same state. Mirrors the relational schema: unique
/// category names, product → category foreign key, cascade on category delete.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    tables: RwLock<Tables>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a category + product repository pair over a fresh shared store.
    pub fn repositories() -> (InMemoryCategoryRepository, InMemoryProductRepository) {
        let store = Arc::new(Self::new());
        (
            InMemoryCategoryRepository::new(store.clone()),
            InMemoryProductRepository::new(store),
        )
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| RepositoryError::Storage("lock poisoned".to_string()))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| RepositoryError::Storage("lock poisoned".to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryCategoryRepository {
    store: Arc<InMemoryCatalogStore>,
}

impl InMemoryCategoryRepository {
    pub fn new(store: Arc<InMemoryCatalogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn get_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        Ok(self.store.read()?.categories.get(&id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> RepositoryResult<Option<Category>> {
        Ok(self
            .store
            .read()?
            .categories
            .values()
            .find(|c| c.name() == name)
            .cloned())
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Category>> {
        let tables = self.store.read()?;
        let mut rows: Vec<Category> = tables.categories.values().cloned().collect();
        rows.sort_by(|a, b| {
            a.display_order()
                .cmp(&b.display_order())
                .then_with(|| a.name().cmp(b.name()))
        });
        Ok(rows)
    }

    async fn create(&self, category: Category) -> RepositoryResult<Category> {
        let mut tables = self.store.write()?;
        if tables.categories.contains_key(category.id()) {
            return Err(RepositoryError::UniqueViolation(format!(
                "category id {} already exists",
                category.id()
            )));
        }
        if tables.name_taken_by_other(category.name(), category.id_typed()) {
            return Err(RepositoryError::UniqueViolation(format!(
                "category name '{}' already exists",
                category.name()
            )));
        }
        tables.categories.insert(category.id_typed(), category.clone());
        Ok(category)
    }

    async fn update(&self, category: Category) -> RepositoryResult<Category> {
        let mut tables = self.store.write()?;
        if !tables.categories.contains_key(category.id()) {
            return Err(RepositoryError::Storage(format!(
                "category {} does not exist",
                category.id()
            )));
        }
        if tables.name_taken_by_other(category.name(), category.id_typed()) {
            return Err(RepositoryError::UniqueViolation(format!(
                "category name '{}' already exists",
                category.name()
            )));
        }
        tables.categories.insert(category.id_typed(), category.clone());
        Ok(category)
    }

    async fn delete(&self, id: CategoryId) -> RepositoryResult<()> {
        let mut tables = self.store.write()?;
        if tables.categories.remove(&id).is_some() {
            tables.products.retain(|_, p| p.category_id() != id);
        }
        Ok(())
    }

    async fn exists(&self, id: CategoryId) -> RepositoryResult<bool> {
        Ok(self.store.read()?.categories.contains_key(&id))
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<InMemoryCatalogStore>,
}

impl InMemoryProductRepository {
    pub fn new(store: Arc<InMemoryCatalogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        let tables = self.store.read()?;
        Ok(tables.products.get(&id).map(|p| tables.joined(p)))
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Product>> {
        Ok(self.store.read()?.select(|_| true))
    }

    async fn get_by_category_id(&self, category_id: CategoryId) -> RepositoryResult<Vec<Product>> {
        Ok(self
            .store
            .read()?
            .select(|p| p.category_id() == category_id))
    }

    async fn get_by_category_name(&self, name: &str) -> RepositoryResult<Vec<Product>> {
        let tables = self.store.read()?;
        Ok(tables.select(|p| {
            tables
                .categories
                .get(&p.category_id())
                .is_some_and(|c| c.name() == name)
        }))
    }

    async fn get_available(&self) -> RepositoryResult<Vec<Product>> {
        Ok(self.store.read()?.select(|p| p.is_available()))
    }

    async fn create(&self, product: Product) -> RepositoryResult<Product> {
        let mut tables = self.store.write()?;
        if !tables.categories.contains_key(&product.category_id()) {
            return Err(RepositoryError::ForeignKeyViolation(format!(
                "category {} does not exist",
                product.category_id()
            )));
        }
        if tables.products.contains_key(product.id()) {
            return Err(RepositoryError::UniqueViolation(format!(
                "product id {} already exists",
                product.id()
            )));
        }
        let stored = product.with_category_name(None);
        let joined = tables.joined(&stored);
        tables.products.insert(stored.id_typed(), stored);
        Ok(joined)
    }

    async fn update(&self, product: Product) -> RepositoryResult<Product> {
        let mut tables = self.store.write()?;
        if !tables.products.contains_key(product.id()) {
            return Err(RepositoryError::Storage(format!(
                "product {} does not exist",
                product.id()
            )));
        }
        if !tables.categories.contains_key(&product.category_id()) {
            return Err(RepositoryError::ForeignKeyViolation(format!(
                "category {} does not exist",
                product.category_id()
            )));
        }
        let stored = product.with_category_name(None);
        let joined = tables.joined(&stored);
        tables.products.insert(stored.id_typed(), stored);
        Ok(joined)
    }

    async fn delete(&self, id: ProductId) -> RepositoryResult<()> {
        self.store.write()?.products.remove(&id);
        Ok(())
    }

    async fn exists(&self, id: ProductId) -> RepositoryResult<bool> {
        Ok(self.store.read()?.products.contains_key(&id))
    }
}
