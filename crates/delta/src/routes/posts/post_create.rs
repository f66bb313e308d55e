use axum::{extract::State, http::StatusCode};
use lostfound_database::{Database, Post, User};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::util::json::{Json, Validate};

/// # Create Post
///
/// List a lost or found item. Images must already be uploaded.
#[utoipa::path(
    post,
    path = "/posts",
    tag = "Posts",
    operation_id = "createPost",
    security(("Bearer Token" = [])),
    request_body = v0::DataCreatePost,
    responses(
        (status = 201, description = "Created post", body = v0::ApiResponse<v0::Post>),
        (status = 422, description = "Invalid post", body = lostfound_result::Error),
    )
)]
pub async fn req(
    user: User,
    State(db): State<Database>,
    Validate(Json(data)): Validate<Json<v0::DataCreatePost>>,
) -> Result<(StatusCode, Json<v0::ApiResponse<v0::Post>>)> {
    let post = Post::create(&db, &user, data).await?;

    Ok((
        StatusCode::CREATED,
        Json(v0::ApiResponse::with_message(
            "Post created successfully",
            post.into(),
        )),
    ))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::util::test::TestHarness;

    #[tokio::test]
    async fn creates_with_defaults() {
        let harness = TestHarness::new().await;
        let (user, token) = harness.new_user().await;

        let (status, body) = harness
            .post(
                "/posts",
                &token,
                json!({
                    "title": "  Wallet ",
                    "description": "Brown leather wallet",
                    "status": "found",
                    "location": { "coordinates": [13.4, 52.5], "placeName": "Alexanderplatz" },
                    "predictedItems": [{ "label": "wallet", "confidence": 0.93 }]
                }),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["title"], "Wallet");
        assert_eq!(body["data"]["status"], "found");
        assert_eq!(body["data"]["category"], "other");
        assert_eq!(body["data"]["user_id"], user.id.as_str());
        assert_eq!(body["data"]["location"]["type"], "Point");
        assert_eq!(body["data"]["predictedItems"][0]["category"], "other");
        assert_eq!(body["data"]["repost"], json!([]));
    }

    #[tokio::test]
    async fn invalid_posts_are_rejected() {
        let harness = TestHarness::new().await;
        let (_, token) = harness.new_user().await;

        let (status, body) = harness
            .post(
                "/posts",
                &token,
                json!({
                    "title": " ",
                    "description": "Brown leather wallet",
                    "status": "lost",
                    "predictedItems": [{ "label": "wallet", "confidence": 2.0 }]
                }),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["data"]["type"], "FailedValidation");
        assert_eq!(
            body["data"]["details"]
                .as_array()
                .unwrap()
                .iter()
                .map(|detail| detail["field"].as_str().unwrap())
                .collect::<Vec<_>>(),
            vec!["predicted_items[0].confidence", "title"]
        );

        let (status, body) = harness
            .post(
                "/posts",
                &token,
                json!({ "title": "Wallet", "description": "Brown", "status": "stolen" }),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["data"]["details"][0]["field"], "body");
    }
}
