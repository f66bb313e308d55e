use axum::{routing::get, Router};

use crate::AppState;

pub mod fetch_user;
pub mod find_users;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/:id", get(fetch_user::req))
        .route("/users/find/:username", get(find_users::req))
}
