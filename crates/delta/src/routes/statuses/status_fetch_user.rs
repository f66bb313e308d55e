use axum::extract::{Path, State};
use chrono::Utc;
use lostfound_database::{util::id::validate_id, Database, Status, User};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::util::json::Json;

/// # Fetch User Statuses
#[utoipa::path(
    get,
    path = "/statuses/user/{id}",
    tag = "Statuses",
    operation_id = "fetchUserStatuses",
    security(("Bearer Token" = [])),
    params(("id" = String, Path, description = "User Id")),
    responses(
        (status = 200, description = "Active statuses of the user", body = v0::ApiResponse<Vec<v0::StatusWithUser>>),
    )
)]
pub async fn req(
    _user: User,
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Json<v0::ApiResponse<Vec<v0::StatusWithUser>>>> {
    validate_id("id", &id)?;

    let statuses = db.fetch_active_statuses_by_user(&id, Utc::now()).await?;
    Ok(Json(v0::ApiResponse::new(
        Status::with_users(&db, statuses).await?,
    )))
}
