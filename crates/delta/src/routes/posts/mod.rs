use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub mod like_members;
pub mod like_toggle;
pub mod post_create;
pub mod post_delete;
pub mod post_edit;
pub mod post_feed;
pub mod post_fetch;
pub mod post_fetch_by_user;
pub mod post_fetch_reposted;
pub mod post_repost;
pub mod post_search;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(post_feed::req).post(post_create::req))
        .route(
            "/posts/:id",
            get(post_fetch::req)
                .patch(post_edit::req)
                .delete(post_delete::req),
        )
        .route("/posts/:id/repost", post(post_repost::req))
        .route(
            "/posts/:id/like",
            get(like_members::req).post(like_toggle::req),
        )
        .route("/posts/user/:id", get(post_fetch_by_user::req))
        .route("/posts/user/:id/repost", get(post_fetch_reposted::req))
        .route("/posts/description/:text", get(post_search::req))
}
