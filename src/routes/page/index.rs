use crate::error::AppError;
use crate::state::SharedState;
use axum::extract::State;
use axum::response::Html;

pub(super) async fn get(State(state): SharedState) -> Result<Html<String>, AppError> {
    let posts = state.store.list_posts().await?;
    Ok(crate::view::listing::public(&posts))
}
