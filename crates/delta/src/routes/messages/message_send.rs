use axum::{extract::State, http::StatusCode};
use lostfound_database::{Database, Message, User};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::util::json::{Json, Validate};

/// # Send Message
#[utoipa::path(
    post,
    path = "/messages",
    tag = "Messages",
    operation_id = "sendMessage",
    security(("Bearer Token" = [])),
    request_body = v0::DataSendMessage,
    responses(
        (status = 201, description = "Sent message", body = v0::ApiResponse<v0::Message>),
        (status = 404, description = "No such recipient", body = lostfound_result::Error),
    )
)]
pub async fn req(
    user: User,
    State(db): State<Database>,
    Validate(Json(data)): Validate<Json<v0::DataSendMessage>>,
) -> Result<(StatusCode, Json<v0::ApiResponse<v0::Message>>)> {
    let message = Message::send(&db, &user, data).await?;

    Ok((
        StatusCode::CREATED,
        Json(v0::ApiResponse::with_message(
            "Message sent successfully",
            message.into(),
        )),
    ))
}
