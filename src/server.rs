use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::database::{InMemoryProductRepository, JsonStore, ProductStore};
use crate::services::ProductService;
use crate::state::AppState;

/// Seeds the repository from the products file. A missing or malformed file is fatal.
pub fn build_state(config: &AppConfig) -> Result<AppState> {
    let store = Arc::new(JsonStore::new(&config.store.products_file));
    let products = store
        .get_all()
        .with_context(|| format!("failed to load products from {}", store.path().display()))?;
    tracing::info!(
        "Loaded {} products from {}",
        products.len(),
        store.path().display()
    );

    let mut repository = InMemoryProductRepository::new(products);
    if config.store.persist_on_write {
        tracing::info!("Persisting product mutations to {}", store.path().display());
        repository = repository.with_store(store);
    }

    if config.security.token.is_empty() {
        tracing::warn!("TOKEN is not configured; every mutating request will be rejected");
    }

    let service = ProductService::new(Arc::new(repository));
    Ok(AppState::new(service, config.security.token.as_str()))
}

pub fn build_app(config: &AppConfig) -> Result<Router> {
    let state = build_state(config)?;
    Ok(crate::routes::app(state, &config.api))
}

/// Serves the application on an already bound listener until the process stops
pub async fn serve(listener: TcpListener, config: &AppConfig) -> Result<()> {
    let app = build_app(config)?;
    let addr = listener.local_addr().context("listener has no local address")?;
    tracing::info!("Product catalog API listening on http://{}", addr);

    axum::serve(listener, app).await.context("server error")
}
