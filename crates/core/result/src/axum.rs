use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::Error;

/// HTTP response builder for Error enum
///
/// Every error leaves the service in the same shape:
/// `{ status: "error", error, statuscode, data }`
impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let code = self.error_type.status_code();
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = json!({
            "status": "error",
            "error": self.error_type.to_string(),
            "statuscode": code,
            "data": &self,
        });

        (status, Json(body)).into_response()
    }
}
