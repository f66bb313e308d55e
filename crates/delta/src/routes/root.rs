use axum::extract::State;
use lostfound_database::Database;
use serde::Serialize;
use utoipa::ToSchema;

use crate::util::json::Json;

/// Capture crate version from Cargo
static CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// # Service Information
#[derive(Serialize, ToSchema)]
pub struct RootResponse {
    /// Greeting
    pub message: &'static str,
    /// Running version
    pub version: &'static str,
    /// Storage backend in use
    pub database: &'static str,
}

/// Root response from service
#[utoipa::path(
    get,
    path = "/",
    tag = "Misc",
    responses(
        (status = 200, description = "Root response", body = RootResponse)
    )
)]
pub async fn root(State(db): State<Database>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "Lost & Found API is running",
        version: CRATE_VERSION,
        database: match db {
            Database::Reference(_) => "reference",
            Database::MongoDb(_) => "mongodb",
        },
    })
}
