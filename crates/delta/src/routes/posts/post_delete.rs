use axum::extract::{Path, State};
use lostfound_database::{util::id::validate_id, Database, User};
use lostfound_models::v0;
use lostfound_result::{create_error, Result};

use crate::util::json::Json;

/// # Delete Post
///
/// Delete your own post together with its likes and comments.
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "Posts",
    operation_id = "deletePost",
    security(("Bearer Token" = [])),
    params(("id" = String, Path, description = "Post Id")),
    responses(
        (status = 200, description = "Id of the deleted post", body = v0::ApiResponse<String>),
        (status = 403, description = "Not the author", body = lostfound_result::Error),
        (status = 404, description = "No such post", body = lostfound_result::Error),
    )
)]
pub async fn req(
    user: User,
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Json<v0::ApiResponse<String>>> {
    validate_id("id", &id)?;

    let post = db.fetch_post(&id).await?;
    if post.user_id != user.id {
        return Err(create_error!(NotOwner));
    }

    post.delete(&db).await?;
    Ok(Json(v0::ApiResponse::with_message(
        "Post deleted successfully",
        id,
    )))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::util::test::TestHarness;

    #[tokio::test]
    async fn only_the_author_deletes() {
        let harness = TestHarness::new().await;
        let (_, owner_token) = harness.new_user().await;
        let (_, other_token) = harness.new_user().await;
        let id = harness.new_post(&owner_token, "Gloves", "Red gloves").await;

        let (status, body) = harness
            .delete(&format!("/posts/{id}"), &other_token)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["status"], "error");
        assert_eq!(body["statuscode"], 403);

        let (status, body) = harness
            .delete(&format!("/posts/{id}"), &owner_token)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], id.as_str());

        let (status, _) = harness.get(&format!("/posts/{id}"), &owner_token).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn comments_go_with_the_post() {
        let harness = TestHarness::new().await;
        let (_, token) = harness.new_user().await;
        let id = harness.new_post(&token, "Gloves", "Red gloves").await;

        let (status, _) = harness
            .post(
                &format!("/posts/{id}/comments"),
                &token,
                json!({ "comment": "Still looking" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        harness.delete(&format!("/posts/{id}"), &token).await;

        let (status, body) = harness
            .get(&format!("/posts/{id}/comments"), &token)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["data"]["type"], "UnknownPost");
    }
}
