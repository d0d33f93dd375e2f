use super::{escape, page};
use axum::response::Html;

pub fn not_found(slug: &str) -> Html<String> {
    page(
        "Post not found",
        &format!(
            "<div class=\"error\">Uh oh! The post with the slug \"{}\" does not exist!</div>",
            escape(slug)
        ),
    )
}

pub fn error(message: &str) -> Html<String> {
    page(
        "Something went wrong",
        &format!(
            "<div class=\"error\">Oh no, something went wrong!\n<pre>{}</pre></div>",
            escape(message)
        ),
    )
}
