use axum::extract::{Path, State};
use lostfound_database::{Database, Message, User};
use lostfound_models::v0;
use lostfound_result::{create_error, Result};

use crate::util::json::Json;

/// # Fetch Conversations
///
/// Your messages grouped by the other participant, most recent
/// conversation first.
#[utoipa::path(
    get,
    path = "/messages/users/{id}",
    tag = "Messages",
    operation_id = "fetchConversations",
    security(("Bearer Token" = [])),
    params(("id" = String, Path, description = "Your user Id")),
    responses(
        (status = 200, description = "Conversations", body = v0::ApiResponse<Vec<v0::Conversation>>),
        (status = 403, description = "Not your conversations", body = lostfound_result::Error),
    )
)]
pub async fn req(
    user: User,
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Json<v0::ApiResponse<Vec<v0::Conversation>>>> {
    if id != user.id {
        return Err(create_error!(NotParticipant));
    }

    Message::conversations(&db, &user.id)
        .await
        .map(|conversations| Json(v0::ApiResponse::new(conversations)))
}
