use super::{PostStore, Result, StoreError};
use crate::blog::{Post, PostInput, Slug};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    posts: RwLock<HashMap<Slug, Post>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn get_post(&self, slug: &str) -> Result<Option<Post>> {
        Ok(self.posts.read().await.get(slug).cloned())
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        let mut posts = self.posts.read().await.values().cloned().collect::<Vec<_>>();
        super::sort_for_listing(&mut posts);
        Ok(posts)
    }

    async fn create_post(&self, input: PostInput) -> Result<Post> {
        let mut posts = self.posts.write().await;
        if posts.contains_key(&input.slug) {
            return Err(StoreError::SlugTaken(input.slug));
        }

        let post = Post::from_input(input, chrono::Utc::now());
        posts.insert(post.slug.clone(), post.clone());

        Ok(post)
    }

    async fn update_post(&self, slug: &str, input: PostInput) -> Result<Post> {
        let mut posts = self.posts.write().await;
        if !posts.contains_key(slug) {
            return Err(StoreError::NotFound(slug.to_owned()));
        }
        if input.slug != slug && posts.contains_key(&input.slug) {
            return Err(StoreError::SlugTaken(input.slug));
        }

        let Some(mut post) = posts.remove(slug) else {
            return Err(StoreError::NotFound(slug.to_owned()));
        };
        post.apply(input, chrono::Utc::now());
        posts.insert(post.slug.clone(), post.clone());

        Ok(post)
    }

    async fn delete_post(&self, slug: &str) -> Result<()> {
        match self.posts.write().await.remove(slug) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(slug.to_owned())),
        }
    }
}
