//! # Schema Migrations
//!
//! Migrations live in `migrations/` as `YYYYMMDDHHMMSS_description.sql` files and are
//! embedded at compile time. sqlx records applied versions in `_sqlx_migrations` and
//! serializes concurrent runners with an advisory lock.

use sqlx::migrate::Migrator;
use sqlx::PgPool;
use tracing::info;

use super::StoreResult;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Apply every pending migration
pub async fn run_all(pool: &PgPool) -> StoreResult<()> {
    let pending = MIGRATOR.iter().count();
    info!(known_migrations = pending, "Applying database migrations");
    MIGRATOR.run(pool).await?;
    info!("Database migrations complete");
    Ok(())
}

/// Versions of the embedded migrations, oldest first
pub fn embedded_versions() -> Vec<i64> {
    MIGRATOR.iter().map(|migration| migration.version).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_embedded_in_order() {
        let versions = embedded_versions();
        assert!(!versions.is_empty());
        assert!(versions.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
