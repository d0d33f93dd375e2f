use super::{PostStore, Result, StoreError};
use crate::blog::{Post, PostInput, Slug};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

const META_FILE: &str = "meta.json";
const TEXT_FILE: &str = "text.md";
// under `<root>/staging/`, only touched while `write_lock` is held
const NEXT_DIR: &str = "next";
const PREVIOUS_DIR: &str = "previous";

/// One folder per post under `<root>/post/`, holding `meta.json` and the
/// markdown body in `text.md`. Folder names are the url-encoded slug.
///
/// Writes are staged as a complete folder under `<root>/staging/` and moved
/// into place with `rename`, so a failed create or update leaves the stored
/// post as it was.
#[derive(Debug)]
pub struct FileStore {
    posts_dir: PathBuf,
    staging_dir: PathBuf,
    // held across every check-then-write sequence
    write_lock: Mutex<()>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PostMeta {
    slug: Slug,
    title: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl FileStore {
    pub async fn open(root: impl AsRef<Path>) -> Result<FileStore> {
        let posts_dir = root.as_ref().join("post");
        tokio::fs::create_dir_all(&posts_dir).await?;

        // leftovers from an interrupted write
        let staging_dir = root.as_ref().join("staging");
        match tokio::fs::remove_dir_all(&staging_dir).await {
            Ok(()) => (),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => (),
            Err(err) => return Err(err.into()),
        }
        tokio::fs::create_dir_all(&staging_dir).await?;

        Ok(FileStore {
            posts_dir,
            staging_dir,
            write_lock: Mutex::new(()),
        })
    }

    fn post_dir(&self, slug: &str) -> Result<PathBuf> {
        if slug.is_empty() || slug == "." || slug == ".." {
            return Err(StoreError::InvalidSlug(slug.to_owned()));
        }

        Ok(self.posts_dir.join(urlencoding::encode(slug).as_ref()))
    }

    async fn read_post(post_dir: &Path) -> Result<Option<Post>> {
        let meta = match tokio::fs::read(post_dir.join(META_FILE)).await {
            Ok(it) => it,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let meta = serde_json::from_slice::<PostMeta>(&meta)?;
        let markdown = tokio::fs::read_to_string(post_dir.join(TEXT_FILE)).await?;

        Ok(Some(Post {
            slug: meta.slug,
            title: meta.title,
            markdown,
            created_at: meta.created_at,
            updated_at: meta.updated_at,
        }))
    }

    async fn write_post(post_dir: &Path, post: &Post) -> Result<()> {
        let meta = PostMeta {
            slug: post.slug.clone(),
            title: post.title.clone(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        };

        tokio::fs::write(post_dir.join(TEXT_FILE), &post.markdown).await?;
        tokio::fs::write(post_dir.join(META_FILE), serde_json::to_vec(&meta)?).await?;

        Ok(())
    }

    /// Writes `post` into a fresh staging folder and returns its path.
    async fn stage(&self, post: &Post) -> Result<PathBuf> {
        let next_dir = self.staging_dir.join(NEXT_DIR);
        tokio::fs::create_dir(&next_dir).await?;

        if let Err(err) = FileStore::write_post(&next_dir, post).await {
            discard(&next_dir).await;
            return Err(err);
        }

        Ok(next_dir)
    }

    /// Moves the staged folder to `new_dir`, replacing the folder at `old_dir`.
    /// On failure the folder at `old_dir` is put back.
    async fn swap_in(&self, next_dir: &Path, old_dir: &Path, new_dir: &Path) -> Result<()> {
        let previous_dir = self.staging_dir.join(PREVIOUS_DIR);

        if let Err(err) = tokio::fs::rename(old_dir, &previous_dir).await {
            discard(next_dir).await;
            return Err(err.into());
        }

        if let Err(err) = tokio::fs::rename(next_dir, new_dir).await {
            if let Err(restore_err) = tokio::fs::rename(&previous_dir, old_dir).await {
                tracing::error!(
                    path = ?old_dir,
                    %restore_err,
                    "couldn't restore post after failed update"
                );
            }
            discard(next_dir).await;
            return Err(err.into());
        }

        discard(&previous_dir).await;
        Ok(())
    }
}

#[async_trait]
impl PostStore for FileStore {
    async fn get_post(&self, slug: &str) -> Result<Option<Post>> {
        let post_dir = match self.post_dir(slug) {
            Ok(it) => it,
            Err(StoreError::InvalidSlug(_)) => return Ok(None),
            Err(err) => return Err(err),
        };

        FileStore::read_post(&post_dir).await
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        let mut entries = tokio::fs::read_dir(&self.posts_dir).await?;
        let mut posts = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }

            match FileStore::read_post(&entry.path()).await {
                Ok(Some(post)) => posts.push(post),
                Ok(None) => (),
                Err(err) => {
                    tracing::warn!(path = ?entry.path(), %err, "skipping unreadable post");
                }
            }
        }

        super::sort_for_listing(&mut posts);
        Ok(posts)
    }

    async fn create_post(&self, input: PostInput) -> Result<Post> {
        let _guard = self.write_lock.lock().await;
        let post_dir = self.post_dir(&input.slug)?;

        if tokio::fs::try_exists(&post_dir).await? {
            return Err(StoreError::SlugTaken(input.slug));
        }

        let post = Post::from_input(input, chrono::Utc::now());
        let next_dir = self.stage(&post).await?;
        if let Err(err) = tokio::fs::rename(&next_dir, &post_dir).await {
            discard(&next_dir).await;
            return Err(err.into());
        }

        Ok(post)
    }

    async fn update_post(&self, slug: &str, input: PostInput) -> Result<Post> {
        let _guard = self.write_lock.lock().await;
        let old_dir = self.post_dir(slug)?;
        let new_dir = self.post_dir(&input.slug)?;

        let Some(mut post) = FileStore::read_post(&old_dir).await? else {
            return Err(StoreError::NotFound(slug.to_owned()));
        };
        if new_dir != old_dir && tokio::fs::try_exists(&new_dir).await? {
            return Err(StoreError::SlugTaken(input.slug));
        }

        post.apply(input, chrono::Utc::now());
        let next_dir = self.stage(&post).await?;
        self.swap_in(&next_dir, &old_dir, &new_dir).await?;

        Ok(post)
    }

    async fn delete_post(&self, slug: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let post_dir = self.post_dir(slug)?;

        match tokio::fs::remove_dir_all(&post_dir).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(slug.to_owned()))
            }
            Err(err) => Err(err.into()),
        }
    }
}

async fn discard(dir: &Path) {
    if let Err(err) = tokio::fs::remove_dir_all(dir).await {
        if err.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = ?dir, %err, "couldn't remove staged post folder");
        }
    }
}
