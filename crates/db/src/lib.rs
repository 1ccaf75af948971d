//! SQLite pool factory and schema bootstrap.
//!
//! The pool is the only handle to the record store. Callers acquire a
//! connection per unit of work; a `PoolConnection` goes back to the pool when
//! it is dropped, whichever way the unit of work ends.

use std::str::FromStr;
use std::time::Duration;

use bookstore_kernel::settings::DatabaseSettings;
use bookstore_kernel::SchemaDefinition;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

/// Errors raised while preparing the record store.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("invalid database url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to connect to '{url}': {source}")]
    Connect {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to apply schema '{module}/{id}': {source}")]
    Schema {
        module: String,
        id: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error(transparent)]
    Query(#[from] sqlx::Error),
}

/// Open a connection pool for the configured database.
///
/// File databases are created when missing. In-memory databases are pinned
/// to a single connection that never expires, since every SQLite connection
/// to `:memory:` would otherwise see its own empty database.
pub async fn connect(settings: &DatabaseSettings) -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str(&settings.url)
        .map_err(|source| DbError::InvalidUrl {
            url: settings.url.clone(),
            source,
        })?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if settings.is_in_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(settings.max_connections.max(1))
    };

    let pool = pool_options
        .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms))
        .connect_with(options)
        .await
        .map_err(|source| DbError::Connect {
            url: settings.url.clone(),
            source,
        })?;

    tracing::info!(
        target: "bookstore-db",
        url = %settings.url,
        max_connections = pool.options().get_max_connections(),
        "database pool ready"
    );

    Ok(pool)
}

/// Apply schema definitions in the given order.
///
/// Every definition is expected to be idempotent, so this runs on each start.
pub async fn apply_schema(
    pool: &SqlitePool,
    definitions: &[(String, SchemaDefinition)],
) -> Result<(), DbError> {
    for (module, definition) in definitions {
        tracing::debug!(
            target: "bookstore-db",
            module = %module,
            id = definition.id,
            "applying schema definition"
        );

        sqlx::raw_sql(definition.ddl)
            .execute(pool)
            .await
            .map_err(|source| DbError::Schema {
                module: module.clone(),
                id: definition.id,
                source,
            })?;
    }

    tracing::info!(
        target: "bookstore-db",
        count = definitions.len(),
        "schema applied"
    );

    Ok(())
}

/// Round-trip a trivial statement to check the store is reachable.
pub async fn ping(pool: &SqlitePool) -> Result<(), DbError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
