//! Call-recording repository fakes for use-case tests.
//!
//! Rows are kept in insertion order and returned unsorted, so tests can tell
//! ordering done by a use case from ordering done by storage.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use stackfood_catalog::{Category, Product};
use stackfood_core::{CategoryId, Entity, ProductId};

use crate::repository::{CategoryRepository, ProductRepository, RepositoryResult};

#[derive(Debug, Default)]
pub struct Calls(Mutex<Vec<&'static str>>);

impl Calls {
    fn record(&self, name: &'static str) {
        self.0.lock().unwrap().push(name);
    }

    pub fn all(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.all().iter().any(|c| *c == name)
    }
}

#[derive(Debug, Default)]
pub struct FakeCategories {
    rows: Mutex<Vec<Category>>,
    pub calls: Calls,
}

impl FakeCategories {
    pub fn with(rows: Vec<Category>) -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(rows),
            calls: Calls::default(),
        })
    }

    pub fn empty() -> Arc<Self> {
        Self::with(Vec::new())
    }
}

#[async_trait]
impl CategoryRepository for FakeCategories {
    async fn get_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        self.calls.record("get_by_id");
        Ok(self.rows.lock().unwrap().iter().find(|c| *c.id() == id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> RepositoryResult<Option<Category>> {
        self.calls.record("get_by_name");
        Ok(self.rows.lock().unwrap().iter().find(|c| c.name() == name).cloned())
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Category>> {
        self.calls.record("get_all");
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn create(&self, category: Category) -> RepositoryResult<Category> {
        self.calls.record("create");
        self.rows.lock().unwrap().push(category.clone());
        Ok(category)
    }

    async fn update(&self, category: Category) -> RepositoryResult<Category> {
        self.calls.record("update");
        let mut rows = self.rows.lock().unwrap();
        if let Some(slot) = rows.iter_mut().find(|c| c.id() == category.id()) {
            *slot = category.clone();
        }
        Ok(category)
    }

    async fn delete(&self, id: CategoryId) -> RepositoryResult<()> {
        self.calls.record("delete");
        self.rows.lock().unwrap().retain(|c| *c.id() != id);
        Ok(())
    }

    async fn exists(&self, id: CategoryId) -> RepositoryResult<bool> {
        self.calls.record("exists");
        Ok(self.rows.lock().unwrap().iter().any(|c| *c.id() == id))
    }
}

/// Products fake; joins category names from a fixed id → name table.
#[derive(Debug, Default)]
pub struct FakeProducts {
    rows: Mutex<Vec<Product>>,
    names: HashMap<CategoryId, String>,
    pub calls: Calls,
}

impl FakeProducts {
    pub fn with(rows: Vec<Product>, names: &[(CategoryId, &str)]) -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(rows),
            names: names.iter().map(|(id, n)| (*id, n.to_string())).collect(),
            calls: Calls::default(),
        })
    }

    pub fn empty() -> Arc<Self> {
        Self::with(Vec::new(), &[])
    }

    fn joined(&self, product: &Product) -> Product {
        product
            .clone()
            .with_category_name(self.names.get(&product.category_id()).cloned())
    }

    fn select(&self, predicate: impl Fn(&Product) -> bool) -> Vec<Product> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| predicate(p))
            .map(|p| self.joined(p))
            .collect()
    }
}

#[async_trait]
impl ProductRepository for FakeProducts {
    async fn get_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        self.calls.record("get_by_id");
        Ok(self.select(|p| *p.id() == id).into_iter().next())
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Product>> {
        self.calls.record("get_all");
        Ok(self.select(|_| true))
    }

    async fn get_by_category_id(&self, category_id: CategoryId) -> RepositoryResult<Vec<Product>> {
        self.calls.record("get_by_category_id");
        Ok(self.select(|p| p.category_id() == category_id))
    }

    async fn get_by_category_name(&self, name: &str) -> RepositoryResult<Vec<Product>> {
        self.calls.record("get_by_category_name");
        Ok(self.select(|p| self.names.get(&p.category_id()).is_some_and(|n| n == name)))
    }

    async fn get_available(&self) -> RepositoryResult<Vec<Product>> {
        self.calls.record("get_available");
        Ok(self.select(|p| p.is_available()))
    }

    async fn create(&self, product: Product) -> RepositoryResult<Product> {
        self.calls.record("create");
        self.rows.lock().unwrap().push(product.clone());
        Ok(self.joined(&product))
    }

    async fn update(&self, product: Product) -> RepositoryResult<Product> {
        self.calls.record("update");
        let mut rows = self.rows.lock().unwrap();
        if let Some(slot) = rows.iter_mut().find(|p| p.id() == product.id()) {
            *slot = product.clone();
        }
        drop(rows);
        Ok(self.joined(&product))
    }

    async fn delete(&self, id: ProductId) -> RepositoryResult<()> {
        self.calls.record("delete");
        self.rows.lock().unwrap().retain(|p| *p.id() != id);
        Ok(())
    }

    async fn exists(&self, id: ProductId) -> RepositoryResult<bool> {
        self.calls.record("exists");
        Ok(self.rows.lock().unwrap().iter().any(|p| *p.id() == id))
    }
}
