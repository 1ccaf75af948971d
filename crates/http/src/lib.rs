//! HTTP server facade with Axum, error handling, and OpenAPI support.

use std::future::Future;

use anyhow::Context;
use axum::{routing::get, Router};
use sqlx::SqlitePool;
use tokio::net::TcpListener;

use bookstore_kernel::{InitCtx, ModuleRegistry};

pub mod error;
pub mod extract;
pub mod router;
pub mod shutdown;

pub use error::AppError;
pub use extract::{ApiJson, ApiPath, ApiQuery};
use router::RouterBuilder;

/// Start the HTTP server and serve until `shutdown` resolves
pub async fn start_server<F>(
    registry: &ModuleRegistry,
    ctx: &InitCtx<'_>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = ctx.settings.server.bind_address();
    tracing::info!("starting HTTP server on {}", address);

    let app = build_router(registry, ctx);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to {}", address))?;

    tracing::info!("HTTP server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Build the main HTTP router with all module routes mounted
pub fn build_router(registry: &ModuleRegistry, ctx: &InitCtx<'_>) -> Router {
    let pool = ctx.db.clone();

    RouterBuilder::new()
        .route("/healthz", get(move || health_check(pool.clone())))
        .with_modules(registry, ctx)
        .with_openapi(registry)
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(ctx.settings.server.request_timeout_ms)
        .build()
}

/// Health check endpoint; fails while the record store is unreachable
async fn health_check(pool: SqlitePool) -> Result<&'static str, AppError> {
    bookstore_db::ping(&pool)
        .await
        .context("record store unreachable")?;
    Ok("ok")
}
