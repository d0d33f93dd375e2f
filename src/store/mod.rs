use crate::blog::{Post, PostInput, Slug};
use async_trait::async_trait;

pub mod file;
pub mod memory;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no post with slug {0:?}")]
    NotFound(Slug),
    #[error("a post with slug {0:?} already exists")]
    SlugTaken(Slug),
    #[error("slug {0:?} cannot be stored")]
    InvalidSlug(Slug),
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("post metadata is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistence for posts, keyed by slug.
///
/// Implementations own their consistency: creating onto an existing slug fails
/// with [`StoreError::SlugTaken`], and updating a post with a different slug
/// in its input re-keys it so it is only reachable by the new slug.
#[async_trait]
pub trait PostStore: Send + Sync + std::fmt::Debug {
    async fn get_post(&self, slug: &str) -> Result<Option<Post>>;
    async fn list_posts(&self) -> Result<Vec<Post>>;
    async fn create_post(&self, input: PostInput) -> Result<Post>;
    async fn update_post(&self, slug: &str, input: PostInput) -> Result<Post>;
    async fn delete_post(&self, slug: &str) -> Result<()>;
}

/// Newest first, ties broken by slug so listings are stable.
pub(crate) fn sort_for_listing(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.slug.cmp(&b.slug))
    });
}
