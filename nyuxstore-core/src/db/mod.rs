// nyuxstore-core/src/db/mod.rs

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use tracing::info;

use crate::Error;

/// Shared handle to the SQLite pool.
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Opens (or creates) the database at `database_path`. `":memory:"`
    /// gives an in-memory database for tests; that pool is capped at a
    /// single connection so every query sees the migrated schema instead
    /// of a fresh empty database per pooled connection.
    pub async fn new(database_path: &str) -> Result<Self, Error> {
        let pool = if database_path == ":memory:" {
            SqlitePoolOptions::new()
                .max_connections(1)
                .connect("sqlite::memory:")
                .await?
        } else {
            if let Some(parent) = std::path::Path::new(database_path).parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let url = format!("sqlite://{}?mode=rwc", database_path);
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect(&url)
                .await?
        };

        info!("Connected to SQLite database at {}", database_path);
        Ok(Self { pool })
    }

    /// Runs migrations from the workspace `migrations/` folder.
    pub async fn migrate(&self) -> Result<(), Error> {
        info!("Applying migrations...");
        sqlx::migrate!("../migrations").run(&self.pool).await?;
        info!("Migrations applied successfully.");
        Ok(())
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}
