use axum::extract::{Path, State};
use lostfound_database::{util::id::validate_id, Database, User};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::util::json::Json;

/// # Delete Comment
///
/// Deletes the comment and the replies to it.
#[utoipa::path(
    delete,
    path = "/comments/{id}",
    tag = "Comments",
    operation_id = "deleteComment",
    security(("Bearer Token" = [])),
    params(("id" = String, Path, description = "Comment Id")),
    responses(
        (status = 200, description = "Id of the deleted comment", body = v0::ApiResponse<String>),
        (status = 403, description = "Not the author", body = lostfound_result::Error),
    )
)]
pub async fn req(
    user: User,
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Json<v0::ApiResponse<String>>> {
    validate_id("id", &id)?;

    db.fetch_comment(&id).await?.delete(&db, &user).await?;
    Ok(Json(v0::ApiResponse::with_message(
        "Comment deleted successfully",
        id,
    )))
}
