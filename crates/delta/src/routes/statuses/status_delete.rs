use axum::extract::{Path, State};
use lostfound_database::{util::id::validate_id, Database, User};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::util::json::Json;

/// # Delete Status
#[utoipa::path(
    delete,
    path = "/statuses/{id}",
    tag = "Statuses",
    operation_id = "deleteStatus",
    security(("Bearer Token" = [])),
    params(("id" = String, Path, description = "Status Id")),
    responses(
        (status = 200, description = "Id of the deleted status", body = v0::ApiResponse<String>),
        (status = 403, description = "Not the owner", body = lostfound_result::Error),
    )
)]
pub async fn req(
    user: User,
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Json<v0::ApiResponse<String>>> {
    validate_id("id", &id)?;

    db.fetch_status(&id).await?.delete(&db, &user).await?;
    Ok(Json(v0::ApiResponse::with_message(
        "Status deleted successfully",
        id,
    )))
}
