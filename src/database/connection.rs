use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, info};

use super::{migrations, StoreResult};
use crate::config::TaskboardConfig;

/// Owned PostgreSQL pool built from configuration
#[derive(Debug, Clone)]
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    pub async fn connect(config: &TaskboardConfig) -> StoreResult<Self> {
        let database = &config.database;

        debug!(
            max_connections = database.pool,
            checkout_timeout = database.checkout_timeout,
            "Creating database pool"
        );

        let pool = PgPoolOptions::new()
            .max_connections(database.pool)
            .acquire_timeout(database.checkout_timeout())
            .test_before_acquire(true)
            .connect(&config.database_url())
            .await?;

        info!(max_connections = database.pool, "Database pool ready");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> StoreResult<()> {
        migrations::run_all(&self.pool).await
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
