use std::sync::Arc;

use anyhow::Result;
use sqlx::{PgPool, Postgres, migrate::MigrateDatabase, postgres::PgPoolOptions};

pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

pub use memory::MemoryStore;
pub use store::{PersonStore, StoreError, StoreResult, TeamStore, TurnStore};

use repositories::{PersonRepository, TeamRepository, TurnRepository};

/// `DATABASE_URL` scheme that selects the in-process backend.
pub const MEMORY_DATABASE_URL: &str = "memory://";

pub async fn init_database(database_url: &str) -> Result<PgPool> {
    // Create database if it doesn't exist
    if !Postgres::database_exists(database_url).await.unwrap_or(false) {
        log::info!("Creating database {}", database_url);
        Postgres::create_database(database_url).await?;
    }

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    log::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    log::info!("Migrations completed successfully");

    Ok(pool)
}

/// The storage backends the services run against.
#[derive(Clone)]
pub struct Stores {
    pub teams: Arc<dyn TeamStore>,
    pub people: Arc<dyn PersonStore>,
    pub turns: Arc<dyn TurnStore>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            teams: Arc::new(TeamRepository::new(pool.clone())),
            people: Arc::new(PersonRepository::new(pool.clone())),
            turns: Arc::new(TurnRepository::new(pool)),
        }
    }

    pub fn memory(store: MemoryStore) -> Self {
        Self {
            teams: Arc::new(store.clone()),
            people: Arc::new(store.clone()),
            turns: Arc::new(store),
        }
    }

    pub async fn connect(database_url: &str) -> Result<Self> {
        if database_url.starts_with(MEMORY_DATABASE_URL) {
            log::warn!("Using in-memory store; data will not survive a restart");
            return Ok(Self::memory(MemoryStore::new()));
        }

        let pool = init_database(database_url).await?;
        Ok(Self::postgres(pool))
    }
}
