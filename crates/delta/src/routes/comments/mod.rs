use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::AppState;

pub mod comment_create;
pub mod comment_delete;
pub mod comment_edit;
pub mod comment_fetch;
pub mod comment_reply;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/posts/:id/comments",
            get(comment_fetch::req).post(comment_create::req),
        )
        .route(
            "/posts/:id/comments/:comment_id/reply",
            post(comment_reply::req),
        )
        .route(
            "/comments/:id",
            patch(comment_edit::req).delete(comment_delete::req),
        )
}
