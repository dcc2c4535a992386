//! Relational schema for the catalog.
//!
//! The unique index on `categories.name` and the cascading foreign key on
//! `products.category_id` are the storage-level guarantees behind the use
//! cases' check-then-write sequences.

use sqlx::PgPool;
use tracing::info;

use super::postgres::map_sqlx_error;
use super::RepositoryResult;

/// Idempotent DDL, applied statement by statement.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        id            UUID PRIMARY KEY,
        name          VARCHAR(100) NOT NULL,
        description   TEXT NULL,
        display_order INTEGER NOT NULL CHECK (display_order >= 0),
        created_at    TIMESTAMPTZ NOT NULL,
        updated_at    TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_categories_name ON categories (name)",
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id           UUID PRIMARY KEY,
        category_id  UUID NOT NULL REFERENCES categories (id) ON DELETE CASCADE,
        name         VARCHAR(200) NOT NULL,
        description  TEXT NULL,
        price        NUMERIC(10, 2) NOT NULL CHECK (price >= 0),
        image_url    TEXT NULL,
        is_available BOOLEAN NOT NULL DEFAULT TRUE,
        created_at   TIMESTAMPTZ NOT NULL,
        updated_at   TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_products_category_id ON products (category_id)",
    "CREATE INDEX IF NOT EXISTS ix_products_is_available ON products (is_available)",
];

/// Create the catalog tables and indexes if they are missing.
pub async fn ensure_schema(pool: &PgPool) -> RepositoryResult<()> {
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
    }
    info!(statements = SCHEMA_STATEMENTS.len(), "catalog schema ensured");
    Ok(())
}

/// Cheap connectivity probe used by the health endpoint.
pub async fn ping(pool: &PgPool) -> RepositoryResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| map_sqlx_error("ping", e))?;
    Ok(())
}
