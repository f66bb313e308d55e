use axum::{
    routing::{delete, get},
    Router,
};

use crate::AppState;

pub mod status_create;
pub mod status_delete;
pub mod status_fetch_user;
pub mod status_list;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/statuses", get(status_list::req).post(status_create::req))
        .route("/statuses/:id", delete(status_delete::req))
        .route("/statuses/user/:id", get(status_fetch_user::req))
}
