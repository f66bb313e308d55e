use axum::extract::{Path, State};
use lostfound_config::config;
use lostfound_database::{
    feed::{compose_feed, FeedQuery, FeedSelector},
    Database, User,
};
use lostfound_models::v0;
use lostfound_result::{create_error, Result};

use crate::util::json::Json;

/// # Fetch Post
///
/// Fetch a single post with everything the feed attaches to it.
#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "Posts",
    operation_id = "fetchPost",
    security(("Bearer Token" = [])),
    params(("id" = String, Path, description = "Post Id")),
    responses(
        (status = 200, description = "The post", body = v0::ApiResponse<v0::FeedPost>),
        (status = 400, description = "Malformed id", body = lostfound_result::Error),
        (status = 404, description = "No such post", body = lostfound_result::Error),
    )
)]
pub async fn req(
    user: User,
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Json<v0::ApiResponse<v0::FeedPost>>> {
    let config = config().await;
    let post = compose_feed(
        &db,
        FeedQuery::new(FeedSelector::ById(id), &user.id)
            .recent_comments(config.features.recent_comments),
    )
    .await?
    .into_iter()
    .next()
    .ok_or_else(|| create_error!(UnknownPost))?;

    Ok(Json(v0::ApiResponse::with_message(
        "Post retrieved successfully",
        post,
    )))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;

    use crate::util::test::TestHarness;

    #[tokio::test]
    async fn malformed_id_is_a_validation_error() {
        let harness = TestHarness::new().await;
        let (_, token) = harness.new_user().await;

        let (status, body) = harness.get("/posts/not-an-id", &token).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert_eq!(body["statuscode"], 400);
        assert_eq!(body["data"]["type"], "InvalidId");
    }

    #[tokio::test]
    async fn unknown_post_is_not_found() {
        let harness = TestHarness::new().await;
        let (_, token) = harness.new_user().await;

        let (status, body) = harness
            .get(&format!("/posts/{}", TestHarness::rand_string()), &token)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["data"]["type"], "UnknownPost");
    }

    #[tokio::test]
    async fn post_carries_author_profile() {
        let harness = TestHarness::new().await;
        let (user, token) = harness.new_user().await;
        let id = harness.new_post(&token, "Umbrella", "Black umbrella").await;

        let (status, body) = harness.get(&format!("/posts/{id}"), &token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["_id"], id.as_str());
        assert_eq!(body["data"]["user"]["_id"], user.id.as_str());
        assert_eq!(body["data"]["user"]["name"], user.name.as_str());
        assert!(body["data"]["user"].get("email").is_none());
        assert_eq!(body["data"]["commentsCount"], 0);
        assert_eq!(body["data"]["repostsCount"], 0);
    }
}
