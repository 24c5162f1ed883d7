//! SQLite-backed persistence.
//!
//! One [`Database`] wraps the shared pool; the repository methods live in
//! the submodules, grouped by table. Statements are sequential and
//! non-transactional: every write is a single statement, single attempt.

pub mod folders;
pub mod items;
pub mod products;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) the database at `url`, e.g. `sqlite://scantry.db`
    /// or `sqlite::memory:`.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(false);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Ok(Database { pool })
    }

    /// Open a private in-memory database on a single-connection pool.
    ///
    /// A pooled `sqlite::memory:` URL would hand every pool connection its
    /// own empty database, so the pool is pinned to one connection. Used
    /// by tests and ephemeral dev runs.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(false);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Ok(Database { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the three tables if they do not exist yet.
    ///
    /// The `folder_id` reference deliberately carries no `ON DELETE`
    /// action: deleting a folder orphans its items rather than cascading.
    pub async fn initialize_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                barcode TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                brand TEXT NOT NULL,
                calories INTEGER,
                protein TEXT,
                carbs TEXT,
                fats TEXT,
                quantity TEXT,
                image TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS folders (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS scanned_items (
                id TEXT PRIMARY KEY,
                barcode TEXT NOT NULL,
                folder_id TEXT REFERENCES folders(id),
                name TEXT,
                brand TEXT,
                calories INTEGER,
                protein TEXT,
                carbs TEXT,
                fats TEXT,
                quantity TEXT,
                image TEXT,
                scanned_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("database schema initialized");
        Ok(())
    }

    /// Insert the two sample catalog entries when the catalog is empty.
    pub async fn seed_sample_products(&self) -> Result<()> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            return Ok(());
        }

        for (barcode, name, brand, calories, protein, carbs, fats, quantity) in [
            (
                "8901234567890",
                "Organic Greek Yogurt",
                "Nature Valley",
                120_i64,
                "15g",
                "9g",
                "2g",
                "170g",
            ),
            (
                "7654321098765",
                "Crunchy Peanut Butter",
                "Nutty Delights",
                190_i64,
                "7g",
                "6g",
                "16g",
                "340g",
            ),
        ] {
            sqlx::query(
                r#"
                INSERT INTO products (barcode, name, brand, calories, protein, carbs, fats, quantity, image)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(barcode)
            .bind(name)
            .bind(brand)
            .bind(calories)
            .bind(protein)
            .bind(carbs)
            .bind(fats)
            .bind(quantity)
            .bind(scantry_model::product::PLACEHOLDER_IMAGE)
            .execute(&self.pool)
            .await?;
        }

        info!("sample products seeded");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) async fn test_database() -> Database {
    let db = Database::in_memory().await.expect("in-memory database");
    db.initialize_schema().await.expect("schema");
    db
}
