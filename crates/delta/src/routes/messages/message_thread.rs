use axum::extract::{Path, State};
use lostfound_database::{Database, Message, User};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::util::json::Json;

/// # Fetch Thread
///
/// Messages between two users, newest first. Only either of them may read
/// it.
#[utoipa::path(
    get,
    path = "/messages/users/{id}/{other}",
    tag = "Messages",
    operation_id = "fetchThread",
    security(("Bearer Token" = [])),
    params(
        ("id" = String, Path, description = "One participant"),
        ("other" = String, Path, description = "The other participant"),
    ),
    responses(
        (status = 200, description = "Messages", body = v0::ApiResponse<Vec<v0::Message>>),
        (status = 403, description = "Not a participant", body = lostfound_result::Error),
    )
)]
pub async fn req(
    user: User,
    State(db): State<Database>,
    Path((id, other)): Path<(String, String)>,
) -> Result<Json<v0::ApiResponse<Vec<v0::Message>>>> {
    let messages = Message::between(&db, &user, &id, &other)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(v0::ApiResponse::new(messages)))
}
