use crate::admin::{Action, Checked, EditTarget, Submission};
use crate::blog::{Post, Slug, ADMIN_LISTING_PATH};
use crate::error::AppError;
use crate::state::SharedState;
use crate::store::PostStore;
use crate::view::form::PostForm;
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LoadedPost {
    New,
    Existing(Post),
}

impl LoadedPost {
    pub(crate) fn post(&self) -> Option<&Post> {
        match self {
            LoadedPost::New => None,
            LoadedPost::Existing(post) => Some(post),
        }
    }
}

/// `new` never touches storage, so it loads even if a post is stored under that slug.
pub(crate) async fn load(store: &dyn PostStore, target: &EditTarget) -> Result<LoadedPost, AppError> {
    let slug = match target {
        EditTarget::New => return Ok(LoadedPost::New),
        EditTarget::Existing(slug) => slug,
    };

    match store.get_post(slug).await? {
        Some(post) => Ok(LoadedPost::Existing(post)),
        None => Err(AppError::NotFound(slug.clone())),
    }
}

pub(super) async fn get(
    State(state): SharedState,
    Path(slug): Path<Slug>,
) -> Result<Html<String>, AppError> {
    let target = EditTarget::from_slug(slug);
    let loaded = load(state.store.as_ref(), &target).await?;

    Ok(PostForm::for_post(&target, loaded.post()).render())
}

pub(super) async fn post(
    State(state): SharedState,
    Path(slug): Path<Slug>,
    form: Result<Form<Submission>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(submission) = form.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let target = EditTarget::from_slug(slug);

    let action = match submission.check(&target)? {
        Checked::Ready(action) => action,
        Checked::Invalid(values, errors) => {
            tracing::debug!(slug = target.slug(), ?errors, "post form failed validation");
            return Ok(PostForm::with_errors(&target, values, errors)
                .render()
                .into_response());
        }
    };

    perform(state.store.as_ref(), action).await?;

    Ok(Redirect::to(ADMIN_LISTING_PATH).into_response())
}

async fn perform(store: &dyn PostStore, action: Action) -> Result<(), AppError> {
    match action {
        Action::Delete(slug) => {
            store.delete_post(&slug).await?;
            tracing::info!(%slug, "deleted post");
        }
        Action::Create(input) => {
            let post = store.create_post(input).await?;
            tracing::info!(slug = %post.slug, "created post");
        }
        Action::Update(slug, input) => {
            let post = store.update_post(&slug, input).await?;
            tracing::info!(%slug, new_slug = %post.slug, "updated post");
        }
    }

    Ok(())
}
