use anyhow::Context;
use axum::ServiceExt;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod admin;
mod blog;
mod config;
mod error;
mod routes;
mod state;
mod store;
mod view;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = config::load_settings()?;
    let state = state::State::from_settings(&settings)
        .await
        .with_context(|| format!("failed to open {:?} post store", settings.store))?;
    tracing::info!(store = ?settings.store, path = ?settings.store_path, "post store ready");

    let app = routes::app(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;
    tracing::info!(addr = %settings.bind_addr, "serving blog admin");

    axum::serve(
        listener,
        ServiceExt::<axum::extract::Request>::into_make_service(app),
    )
    .await
    .context("error serving app")
}
