use axum::extract::{Path, State};
use lostfound_database::{util::id::validate_id, Database, User};
use lostfound_models::v0;
use lostfound_result::{create_error, Result};

use crate::util::json::{Json, Validate};

/// # Edit Post
///
/// Change any of the details of your own post.
#[utoipa::path(
    patch,
    path = "/posts/{id}",
    tag = "Posts",
    operation_id = "editPost",
    security(("Bearer Token" = [])),
    params(("id" = String, Path, description = "Post Id")),
    request_body = v0::DataEditPost,
    responses(
        (status = 200, description = "Updated post", body = v0::ApiResponse<v0::Post>),
        (status = 403, description = "Not the author", body = lostfound_result::Error),
        (status = 404, description = "No such post", body = lostfound_result::Error),
    )
)]
pub async fn req(
    user: User,
    State(db): State<Database>,
    Path(id): Path<String>,
    Validate(Json(data)): Validate<Json<v0::DataEditPost>>,
) -> Result<Json<v0::ApiResponse<v0::Post>>> {
    validate_id("id", &id)?;

    let mut post = db.fetch_post(&id).await?;
    if post.user_id != user.id {
        return Err(create_error!(NotOwner));
    }

    post.update(&db, data).await?;
    Ok(Json(v0::ApiResponse::with_message(
        "Post updated successfully",
        post.into(),
    )))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::util::test::TestHarness;

    #[tokio::test]
    async fn author_edits_others_cannot() {
        let harness = TestHarness::new().await;
        let (_, token) = harness.new_user().await;
        let (_, other_token) = harness.new_user().await;
        let id = harness.new_post(&token, "Scarf", "Green scarf").await;

        let (status, body) = harness
            .patch(
                &format!("/posts/{id}"),
                &token,
                json!({ "status": "claimed", "description": "Green wool scarf" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["data"]["status"], "claimed");
        assert_eq!(body["data"]["description"], "Green wool scarf");
        assert_eq!(body["data"]["title"], "Scarf");

        let (status, body) = harness
            .patch(&format!("/posts/{id}"), &other_token, json!({ "title": "Mine" }))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["data"]["type"], "NotOwner");
    }
}
