use super::{escape, page};
use crate::blog::{admin_post_path, public_post_path, Post, NEW_POST_SLUG, PUBLIC_LISTING_PATH};
use axum::response::Html;
use std::fmt::Write;

fn post_links(posts: &[Post], link: impl Fn(&str) -> String) -> String {
    if posts.is_empty() {
        return "<p>No posts yet.</p>\n".to_owned();
    }

    let mut list = String::from("<ul>\n");
    for post in posts {
        _ = writeln!(
            list,
            "<li><a href=\"{}\">{}</a></li>",
            escape(&link(&post.slug)),
            escape(&post.title)
        );
    }
    list.push_str("</ul>\n");

    list
}

pub fn admin(posts: &[Post]) -> Html<String> {
    let body = format!(
        "<h1>Blog Admin</h1>\n<p><a href=\"{}\">Create a New Post</a></p>\n{}",
        admin_post_path(NEW_POST_SLUG),
        post_links(posts, admin_post_path)
    );

    page("Blog Admin", &body)
}

pub fn public(posts: &[Post]) -> Html<String> {
    let body = format!("<h1>Posts</h1>\n{}", post_links(posts, public_post_path));

    page("Posts", &body)
}

/// `html` is the already-rendered markdown body.
pub fn post(post: &Post, html: &str) -> Html<String> {
    let body = format!(
        "<p><a href=\"{PUBLIC_LISTING_PATH}\">All posts</a></p>\n<h1>{}</h1>\n<article>\n{html}</article>",
        escape(&post.title)
    );

    page(&post.title, &body)
}
