use axum::extract::{Path, State};
use lostfound_database::{util::id::validate_id, Database, User};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::util::json::{Json, Validate};

/// # Edit Comment
#[utoipa::path(
    patch,
    path = "/comments/{id}",
    tag = "Comments",
    operation_id = "editComment",
    security(("Bearer Token" = [])),
    params(("id" = String, Path, description = "Comment Id")),
    request_body = v0::DataComment,
    responses(
        (status = 200, description = "Updated comment", body = v0::ApiResponse<v0::Comment>),
        (status = 403, description = "Not the author", body = lostfound_result::Error),
    )
)]
pub async fn req(
    user: User,
    State(db): State<Database>,
    Path(id): Path<String>,
    Validate(Json(data)): Validate<Json<v0::DataComment>>,
) -> Result<Json<v0::ApiResponse<v0::Comment>>> {
    validate_id("id", &id)?;

    let mut comment = db.fetch_comment(&id).await?;
    comment.edit(&db, &user, data.comment).await?;

    Ok(Json(v0::ApiResponse::with_message(
        "Comment updated successfully",
        comment.into(),
    )))
}
