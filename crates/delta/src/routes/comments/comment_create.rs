use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use lostfound_database::{util::id::validate_id, Comment, Database, User};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::util::json::{Json, Validate};

/// # Comment on Post
#[utoipa::path(
    post,
    path = "/posts/{id}/comments",
    tag = "Comments",
    operation_id = "createComment",
    security(("Bearer Token" = [])),
    params(("id" = String, Path, description = "Post Id")),
    request_body = v0::DataComment,
    responses(
        (status = 201, description = "Created comment", body = v0::ApiResponse<v0::Comment>),
        (status = 404, description = "No such post", body = lostfound_result::Error),
    )
)]
pub async fn req(
    user: User,
    State(db): State<Database>,
    Path(id): Path<String>,
    Validate(Json(data)): Validate<Json<v0::DataComment>>,
) -> Result<(StatusCode, Json<v0::ApiResponse<v0::Comment>>)> {
    validate_id("id", &id)?;

    let comment = Comment::create(&db, &id, &user, data.comment, None).await?;
    Ok((
        StatusCode::CREATED,
        Json(v0::ApiResponse::with_message(
            "Comment added successfully",
            comment.into(),
        )),
    ))
}
