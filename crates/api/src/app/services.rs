//! Service wiring: which storage the repositories run on.

use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

use stackfood_infra::config::AppConfig;
use stackfood_infra::repository::{
    schema, CategoryRepository, InMemoryCatalogStore, PgCategoryRepository, PgProductRepository,
    ProductRepository, RepositoryResult,
};
use stackfood_infra::seed::seed_catalog;

/// Shared handles the route handlers build use cases from.
#[derive(Clone)]
pub struct AppServices {
    pub categories: Arc<dyn CategoryRepository>,
    pub products: Arc<dyn ProductRepository>,
    pool: Option<PgPool>,
}

impl AppServices {
    /// Empty in-memory catalog (tests/dev).
    pub fn in_memory() -> Self {
        let (categories, products) = InMemoryCatalogStore::repositories();
        Self {
            categories: Arc::new(categories),
            products: Arc::new(products),
            pool: None,
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            categories: Arc::new(PgCategoryRepository::new(pool.clone())),
            products: Arc::new(PgProductRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Connect (or fall back to memory when no database is configured), make
    /// sure the schema exists, and seed an empty catalog when enabled.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let services = match &config.database {
            Some(db) => {
                let pool = PgPoolOptions::new()
                    .max_connections(db.max_connections)
                    .connect(&db.url)
                    .await
                    .context("failed to connect to postgres")?;
                schema::ensure_schema(&pool)
                    .await
                    .context("failed to prepare catalog schema")?;
                info!(max_connections = db.max_connections, "using postgres catalog store");
                Self::postgres(pool)
            }
            None => {
                warn!("DATABASE_URL not set; using in-memory catalog store");
                Self::in_memory()
            }
        };

        if config.seed_catalog {
            seed_catalog(&*services.categories, &*services.products)
                .await
                .context("failed to seed catalog")?;
        }

        Ok(services)
    }

    /// Store reachability for `/health`.
    pub async fn health(&self) -> RepositoryResult<()> {
        match &self.pool {
            Some(pool) => schema::ping(pool).await,
            None => Ok(()),
        }
    }
}
