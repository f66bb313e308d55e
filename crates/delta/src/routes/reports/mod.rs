use axum::{routing::get, Router};

use crate::AppState;

pub mod report_create;
pub mod report_fetch;
pub mod report_list;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reports", get(report_list::req).post(report_create::req))
        .route("/reports/:id", get(report_fetch::req))
}
