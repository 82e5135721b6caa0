//! Application bootstrap shared by the `bookshelf-app` and `bookshelf` binaries.

use std::future::Future;

use anyhow::Context;
use axum::Router;
use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Registry holding every application module
pub fn build_registry(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings).context("failed to register modules")?;
    Ok(registry)
}

/// Full HTTP router for `settings`, without binding a socket
pub fn router(settings: &Settings) -> anyhow::Result<Router> {
    let registry = build_registry(settings)?;
    Ok(bookshelf_http::build_router(&registry, settings))
}

/// Run the module lifecycle around the HTTP server until `shutdown` resolves
pub async fn serve<F>(settings: &Settings, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let registry = build_registry(settings)?;
    let ctx = InitCtx { settings };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = bookshelf_http::start_server(&registry, settings, shutdown).await;

    // Stop modules even when the server failed, then report the first error.
    let stopped = registry.stop_modules().await;
    served?;
    stopped?;

    tracing::info!("bookshelf shut down cleanly");
    Ok(())
}
