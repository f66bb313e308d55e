use axum::{routing::post, Router};

use crate::AppState;

pub mod image_predict;

pub fn router() -> Router<AppState> {
    Router::new().route("/predict", post(image_predict::req))
}
