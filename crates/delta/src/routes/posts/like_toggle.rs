use axum::extract::{Path, State};
use lostfound_database::{util::id::validate_id, Database, Like, User};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::util::json::Json;

/// # Toggle Like
///
/// Like the post, or take the like back if you already did.
#[utoipa::path(
    post,
    path = "/posts/{id}/like",
    tag = "Likes",
    operation_id = "toggleLike",
    security(("Bearer Token" = [])),
    params(("id" = String, Path, description = "Post Id")),
    responses(
        (status = 200, description = "Like state after the toggle", body = v0::ApiResponse<v0::LikeState>),
        (status = 404, description = "No such post", body = lostfound_result::Error),
    )
)]
pub async fn req(
    user: User,
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Json<v0::ApiResponse<v0::LikeState>>> {
    validate_id("id", &id)?;

    let state = Like::toggle(&db, &id, &user.id).await?;
    let message = if state.is_liked {
        "Post liked successfully"
    } else {
        "Post unliked successfully"
    };

    Ok(Json(v0::ApiResponse::with_message(message, state)))
}
