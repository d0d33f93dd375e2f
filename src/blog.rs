use serde::{Deserialize, Serialize};

pub type Slug = String;

/// Reserved slug for the admin page that creates a post.
pub const NEW_POST_SLUG: &str = "new";

pub const ADMIN_LISTING_PATH: &str = "/posts/admin";
pub const PUBLIC_LISTING_PATH: &str = "/posts";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub slug: Slug,
    pub title: String,
    pub markdown: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// The user-editable fields of a post, as passed to create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostInput {
    pub title: String,
    pub slug: Slug,
    pub markdown: String,
}

impl Post {
    pub fn from_input(input: PostInput, now: chrono::DateTime<chrono::Utc>) -> Post {
        Post {
            slug: input.slug,
            title: input.title,
            markdown: input.markdown,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces every editable field, keeping `created_at`.
    pub fn apply(&mut self, input: PostInput, now: chrono::DateTime<chrono::Utc>) {
        self.slug = input.slug;
        self.title = input.title;
        self.markdown = input.markdown;
        self.updated_at = now;
    }
}

pub fn admin_post_path(slug: &str) -> String {
    format!("{ADMIN_LISTING_PATH}/{}", urlencoding::encode(slug))
}

pub fn public_post_path(slug: &str) -> String {
    format!("{PUBLIC_LISTING_PATH}/{}", urlencoding::encode(slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_keeps_creation_time() {
        let created = chrono::Utc::now() - chrono::Duration::hours(1);
        let mut post = Post::from_input(
            PostInput {
                title: "First".into(),
                slug: "first".into(),
                markdown: "# hi".into(),
            },
            created,
        );

        let now = chrono::Utc::now();
        post.apply(
            PostInput {
                title: "Second".into(),
                slug: "second".into(),
                markdown: "# bye".into(),
            },
            now,
        );

        assert_eq!(post.slug, "second");
        assert_eq!(post.title, "Second");
        assert_eq!(post.created_at, created);
        assert_eq!(post.updated_at, now);
    }

    #[test]
    fn post_paths_encode_the_slug() {
        assert_eq!(admin_post_path("new"), "/posts/admin/new");
        assert_eq!(public_post_path("a b"), "/posts/a%20b");
    }
}
