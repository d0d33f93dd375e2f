use crate::blog::PUBLIC_LISTING_PATH;
use crate::state::NestedRouter;
use axum::response::Redirect;
use axum::routing::get;

mod admin;
mod index;
mod post;

pub fn route() -> NestedRouter {
    let page_compression_layer = tower_http::compression::CompressionLayer::new()
        .br(true)
        .quality(tower_http::CompressionLevel::Default);

    axum::Router::new()
        .route("/", get(|| async { Redirect::to(PUBLIC_LISTING_PATH) }))
        .route("/posts", get(index::get))
        .route(
            "/posts/:slug",
            get(post::get).layer(page_compression_layer),
        )
        .merge(admin::route())
}
