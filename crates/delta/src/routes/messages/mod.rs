use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub mod conversations;
pub mod message_send;
pub mod message_thread;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages", post(message_send::req))
        .route("/messages/users/:id", get(conversations::req))
        .route("/messages/users/:id/:other", get(message_thread::req))
}
