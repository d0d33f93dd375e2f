use crate::state::State;
use std::sync::Arc;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

pub mod page;

pub fn app(state: Arc<State>) -> NormalizePath<axum::Router> {
    NormalizePathLayer::trim_trailing_slash().layer(page::route().with_state(state))
}
