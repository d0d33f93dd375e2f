use crate::blog::ADMIN_LISTING_PATH;
use crate::error::AppError;
use crate::state::{NestedRouter, SharedState};
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;

mod edit;

pub fn route() -> NestedRouter {
    axum::Router::new()
        .route(ADMIN_LISTING_PATH, get(index))
        .route(
            &format!("{ADMIN_LISTING_PATH}/:slug"),
            get(edit::get).post(edit::post),
        )
}

async fn index(State(state): SharedState) -> Result<Html<String>, AppError> {
    let posts = state.store.list_posts().await?;
    Ok(crate::view::listing::admin(&posts))
}
