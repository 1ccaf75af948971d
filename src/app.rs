//! Application bootstrap: record store, module lifecycle and HTTP serving.

use std::future::Future;

use anyhow::Context;
use axum::Router;
use bookstore_kernel::{settings::Settings, InitCtx, ModuleRegistry};
use sqlx::SqlitePool;

use crate::modules;

/// A connected application: settings, pool and registered modules.
pub struct App {
    settings: Settings,
    pool: SqlitePool,
    registry: ModuleRegistry,
}

impl App {
    /// Connect to the record store and register every module.
    ///
    /// No module lifecycle hook has run yet.
    pub async fn connect(settings: Settings) -> anyhow::Result<Self> {
        let pool = bookstore_db::connect(&settings.database)
            .await
            .context("failed to open record store")?;

        let mut registry = ModuleRegistry::new();
        modules::register_all(&mut registry);

        Ok(Self {
            settings,
            pool,
            registry,
        })
    }

    /// Connect, then run init, schema and start so the app is ready to serve.
    pub async fn bootstrap(settings: Settings) -> anyhow::Result<Self> {
        let app = Self::connect(settings).await?;
        app.prepare_schema().await?;
        app.start().await?;
        Ok(app)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn ctx(&self) -> InitCtx<'_> {
        InitCtx {
            settings: &self.settings,
            db: &self.pool,
        }
    }

    /// Initialize modules and create any missing tables.
    pub async fn prepare_schema(&self) -> anyhow::Result<()> {
        let ctx = self.ctx();
        self.registry.init_modules(&ctx).await?;

        let definitions = self.registry.collect_schema();
        bookstore_db::apply_schema(&self.pool, &definitions)
            .await
            .context("failed to apply schema")?;
        Ok(())
    }

    /// Run module startup work such as seeding.
    pub async fn start(&self) -> anyhow::Result<()> {
        self.registry.start_modules(&self.ctx()).await
    }

    /// The full HTTP router, as served.
    pub fn router(&self) -> Router {
        bookstore_http::build_router(&self.registry, &self.ctx())
    }

    /// Serve until `shutdown` resolves, then stop modules and close the pool.
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let served = bookstore_http::start_server(&self.registry, &self.ctx(), shutdown).await;

        self.close().await?;
        served
    }

    /// Stop modules in reverse order and close the pool.
    pub async fn close(self) -> anyhow::Result<()> {
        self.registry.stop_modules().await?;
        self.pool.close().await;
        tracing::info!("record store closed");
        Ok(())
    }
}
