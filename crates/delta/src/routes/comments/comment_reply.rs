use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use lostfound_database::{util::id::validate_id, Comment, Database, User};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::util::json::{Json, Validate};

/// # Reply to Comment
///
/// The comment replied to must belong to the same post.
#[utoipa::path(
    post,
    path = "/posts/{id}/comments/{comment_id}/reply",
    tag = "Comments",
    operation_id = "replyComment",
    security(("Bearer Token" = [])),
    params(
        ("id" = String, Path, description = "Post Id"),
        ("comment_id" = String, Path, description = "Comment Id"),
    ),
    request_body = v0::DataComment,
    responses(
        (status = 201, description = "Created reply", body = v0::ApiResponse<v0::Comment>),
        (status = 400, description = "Comment is on another post", body = lostfound_result::Error),
        (status = 404, description = "No such post or comment", body = lostfound_result::Error),
    )
)]
pub async fn req(
    user: User,
    State(db): State<Database>,
    Path((id, comment_id)): Path<(String, String)>,
    Validate(Json(data)): Validate<Json<v0::DataComment>>,
) -> Result<(StatusCode, Json<v0::ApiResponse<v0::Comment>>)> {
    validate_id("id", &id)?;
    validate_id("comment_id", &comment_id)?;

    let reply = Comment::create(&db, &id, &user, data.comment, Some(&comment_id)).await?;
    Ok((
        StatusCode::CREATED,
        Json(v0::ApiResponse::with_message(
            "Reply added successfully",
            reply.into(),
        )),
    ))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::util::test::TestHarness;

    #[tokio::test]
    async fn replies_stay_on_their_post() {
        let harness = TestHarness::new().await;
        let (_, token) = harness.new_user().await;
        let first = harness.new_post(&token, "Bottle", "Steel bottle").await;
        let second = harness.new_post(&token, "Cap", "Blue cap").await;

        let (_, body) = harness
            .post(
                &format!("/posts/{first}/comments"),
                &token,
                json!({ "comment": "Is it dented?" }),
            )
            .await;
        let comment_id = body["data"]["_id"].as_str().unwrap().to_string();

        let (status, body) = harness
            .post(
                &format!("/posts/{first}/comments/{comment_id}/reply"),
                &token,
                json!({ "comment": "A little" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["parentCommentId"], comment_id.as_str());

        let (status, body) = harness
            .post(
                &format!("/posts/{second}/comments/{comment_id}/reply"),
                &token,
                json!({ "comment": "Wrong post" }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["data"]["type"], "InvalidOperation");
    }
}
