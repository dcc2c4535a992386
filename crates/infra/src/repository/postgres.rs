//! Postgres-backed catalog repositories.
//!
//! Queries are runtime-checked (`sqlx::query`) so the crate builds without a
//! live database. Product reads `LEFT JOIN` categories to fill the joined
//! `category_name`.
//!
//! ## Error Mapping
//!
//! | PostgreSQL Error Code | RepositoryError | Scenario |
//! |-----------------------|-----------------|----------|
//! | `23505` | `UniqueViolation` | Two writers raced past the duplicate-name check |
//! | `23503` | `ForeignKeyViolation` | Category deleted between the existence check and the product write |
//! | any other / non-database | `Storage` | Connectivity, decoding, pool closed |

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use stackfood_catalog::{Category, Product};
use stackfood_core::{CategoryId, Entity, Money, ProductId};

use super::r#trait::{CategoryRepository, ProductRepository, RepositoryError, RepositoryResult};

const CATEGORY_COLUMNS: &str = "id, name, description, display_order, created_at, updated_at";

const PRODUCT_SELECT: &str = r#"
    SELECT
        p.id,
        p.category_id,
        p.name,
        p.description,
        p.price,
        p.image_url,
        p.is_available,
        p.created_at,
        p.updated_at,
        c.name AS category_name
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
"#;

#[derive(Debug, Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    #[instrument(skip(self), fields(category_id = %id), err)]
    async fn get_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        let row = sqlx::query(&format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_category_by_id", e))?;

        row.map(|r| decode::<CategoryRow>(&r).map(Category::from))
            .transpose()
    }

    #[instrument(skip(self), err)]
    async fn get_by_name(&self, name: &str) -> RepositoryResult<Option<Category>> {
        let row = sqlx::query(&format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE name = $1"))
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_category_by_name", e))?;

        row.map(|r| decode::<CategoryRow>(&r).map(Category::from))
            .transpose()
    }

    #[instrument(skip(self), err)]
    async fn get_all(&self) -> RepositoryResult<Vec<Category>> {
        let rows = sqlx::query(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY display_order ASC, name ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_categories", e))?;

        rows.iter()
            .map(|r| decode::<CategoryRow>(r).map(Category::from))
            .collect()
    }

    #[instrument(skip(self, category), fields(category_id = %category.id_typed()), err)]
    async fn create(&self, category: Category) -> RepositoryResult<Category> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, description, display_order, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(category.id_typed().as_uuid())
        .bind(category.name())
        .bind(category.description())
        .bind(category.display_order())
        .bind(category.created_at())
        .bind(category.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_category", e))?;

        Ok(category)
    }

    #[instrument(skip(self, category), fields(category_id = %category.id_typed()), err)]
    async fn update(&self, category: Category) -> RepositoryResult<Category> {
        let result = sqlx::query(
            r#"
            UPDATE categories
            SET name = $2, description = $3, display_order = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(category.id_typed().as_uuid())
        .bind(category.name())
        .bind(category.description())
        .bind(category.display_order())
        .bind(category.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_category", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::Storage(format!(
                "category {} does not exist",
                category.id_typed()
            )));
        }
        Ok(category)
    }

    #[instrument(skip(self), fields(category_id = %id), err)]
    async fn delete(&self, id: CategoryId) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_category", e))?;
        Ok(())
    }

    #[instrument(skip(self), fields(category_id = %id), err)]
    async fn exists(&self, id: CategoryId) -> RepositoryResult<bool> {
        let row = sqlx::query("SELECT EXISTS (SELECT 1 FROM categories WHERE id = $1) AS found")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("category_exists", e))?;

        row.try_get("found")
            .map_err(|e| RepositoryError::Storage(format!("failed to read exists flag: {e}")))
    }
}

#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn select_where(
        &self,
        operation: &'static str,
        clause: &str,
        bind: Option<SelectParam<'_>>,
    ) -> RepositoryResult<Vec<Product>> {
        let sql = format!("{PRODUCT_SELECT} {clause} ORDER BY p.created_at ASC, p.id ASC");
        let mut query = sqlx::query(&sql);
        query = match bind {
            Some(SelectParam::Id(id)) => query.bind(id),
            Some(SelectParam::Text(text)) => query.bind(text),
            None => query,
        };

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;

        rows.iter()
            .map(|r| decode::<ProductRow>(r).and_then(Product::try_from))
            .collect()
    }

    /// Re-read a product after a write so the result carries the joined name.
    async fn reload(&self, operation: &'static str, id: ProductId) -> RepositoryResult<Product> {
        self.get_by_id(id).await?.ok_or_else(|| {
            RepositoryError::Storage(format!("product {id} vanished after {operation}"))
        })
    }
}

enum SelectParam<'a> {
    Id(Uuid),
    Text(&'a str),
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn get_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        let row = sqlx::query(&format!("{PRODUCT_SELECT} WHERE p.id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_product_by_id", e))?;

        row.map(|r| decode::<ProductRow>(&r).and_then(Product::try_from))
            .transpose()
    }

    #[instrument(skip(self), err)]
    async fn get_all(&self) -> RepositoryResult<Vec<Product>> {
        self.select_where("list_products", "", None).await
    }

    #[instrument(skip(self), fields(category_id = %category_id), err)]
    async fn get_by_category_id(&self, category_id: CategoryId) -> RepositoryResult<Vec<Product>> {
        self.select_where(
            "list_products_by_category_id",
            "WHERE p.category_id = $1",
            Some(SelectParam::Id(*category_id.as_uuid())),
        )
        .await
    }

    #[instrument(skip(self), err)]
    async fn get_by_category_name(&self, name: &str) -> RepositoryResult<Vec<Product>> {
        self.select_where(
            "list_products_by_category_name",
            "WHERE c.name = $1",
            Some(SelectParam::Text(name)),
        )
        .await
    }

    #[instrument(skip(self), err)]
    async fn get_available(&self) -> RepositoryResult<Vec<Product>> {
        self.select_where("list_available_products", "WHERE p.is_available = TRUE", None)
            .await
    }

    #[instrument(skip(self, product), fields(product_id = %product.id_typed()), err)]
    async fn create(&self, product: Product) -> RepositoryResult<Product> {
        sqlx::query(
            r#"
            INSERT INTO products (
                id, category_id, name, description, price,
                image_url, is_available, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(product.id_typed().as_uuid())
        .bind(product.category_id().as_uuid())
        .bind(product.name())
        .bind(product.description())
        .bind(product.price().amount())
        .bind(product.image_url())
        .bind(product.is_available())
        .bind(product.created_at())
        .bind(product.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_product", e))?;

        self.reload("create_product", product.id_typed()).await
    }

    #[instrument(skip(self, product), fields(product_id = %product.id_typed()), err)]
    async fn update(&self, product: Product) -> RepositoryResult<Product> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET category_id = $2, name = $3, description = $4, price = $5,
                image_url = $6, is_available = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(product.id_typed().as_uuid())
        .bind(product.category_id().as_uuid())
        .bind(product.name())
        .bind(product.description())
        .bind(product.price().amount())
        .bind(product.image_url())
        .bind(product.is_available())
        .bind(product.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_product", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::Storage(format!(
                "product {} does not exist",
                product.id_typed()
            )));
        }
        self.reload("update_product", product.id_typed()).await
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn delete(&self, id: ProductId) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_product", e))?;
        Ok(())
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn exists(&self, id: ProductId) -> RepositoryResult<bool> {
        let row = sqlx::query("SELECT EXISTS (SELECT 1 FROM products WHERE id = $1) AS found")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("product_exists", e))?;

        row.try_get("found")
            .map_err(|e| RepositoryError::Storage(format!("failed to read exists flag: {e}")))
    }
}

/// Map SQLx errors onto repository errors (SQLSTATE-aware).
pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23505") => RepositoryError::UniqueViolation(msg),
                Some("23503") => RepositoryError::ForeignKeyViolation(msg),
                _ => RepositoryError::Storage(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            RepositoryError::Storage(format!("connection pool closed in {}", operation))
        }
        _ => RepositoryError::Storage(format!("sqlx error in {}: {}", operation, err)),
    }
}

fn decode<'r, T>(row: &'r PgRow) -> RepositoryResult<T>
where
    T: FromRow<'r, PgRow>,
{
    T::from_row(row).map_err(|e| RepositoryError::Storage(format!("failed to decode row: {e}")))
}

// SQLx row types

struct CategoryRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    display_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for CategoryRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(CategoryRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            display_order: row.try_get("display_order")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category::restore(
            CategoryId::from_uuid(row.id),
            row.name,
            row.description,
            row.display_order,
            row.created_at,
            row.updated_at,
        )
    }
}

struct ProductRow {
    id: Uuid,
    category_id: Uuid,
    name: String,
    description: Option<String>,
    price: Decimal,
    image_url: Option<String>,
    is_available: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    category_name: Option<String>,
}

impl<'r> FromRow<'r, PgRow> for ProductRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(ProductRow {
            id: row.try_get("id")?,
            category_id: row.try_get("category_id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            image_url: row.try_get("image_url")?,
            is_available: row.try_get("is_available")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            category_name: row.try_get("category_name")?,
        })
    }
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Money::new(row.price).map_err(|e| {
            RepositoryError::Storage(format!("stored price for product {} is invalid: {e}", row.id))
        })?;

        Ok(Product::restore(
            ProductId::from_uuid(row.id),
            CategoryId::from_uuid(row.category_id),
            row.name,
            row.description,
            price,
            row.image_url,
            row.is_available,
            row.created_at,
            row.updated_at,
        )
        .with_category_name(row.category_name))
    }
}
