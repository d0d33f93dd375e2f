use crate::blog::Slug;
use crate::error::AppError;
use crate::state::SharedState;
use axum::extract::{Path, State};
use axum::response::Html;

pub(super) async fn get(
    State(state): SharedState,
    Path(slug): Path<Slug>,
) -> Result<Html<String>, AppError> {
    let Some(post) = state.store.get_post(&slug).await? else {
        return Err(AppError::NotFound(slug));
    };

    let markdown = post.markdown.clone();
    let html = tokio::task::spawn_blocking(move || {
        comrak::markdown_to_html(&markdown, &comrak::Options::default())
    })
    .await
    .map_err(|err| AppError::Render(format!("markdown renderer failed for {slug:?}: {err}")))?;

    Ok(crate::view::listing::post(&post, &html))
}
