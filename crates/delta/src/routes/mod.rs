use axum::{routing::get, Router};

use crate::AppState;

pub mod comments;
pub mod messages;
pub mod notifications;
pub mod posts;
pub mod predict;
pub mod reports;
pub mod root;
pub mod statuses;
pub mod users;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root::root))
        .merge(posts::router())
        .merge(comments::router())
        .merge(reports::router())
        .merge(users::router())
        .merge(statuses::router())
        .merge(messages::router())
        .merge(predict::router())
        .merge(notifications::router())
}
