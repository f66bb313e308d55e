use axum::{routing::post, Router};

use crate::AppState;

pub mod notification_send;

pub fn router() -> Router<AppState> {
    Router::new().route("/notifications", post(notification_send::req))
}
