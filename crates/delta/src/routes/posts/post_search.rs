use axum::extract::{Path, State};
use lostfound_database::{search::SearchService, User};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::util::json::Json;

/// # Search Posts
///
/// Fuzzy search over post descriptions, best match first. No match is an
/// empty list, not an error.
#[utoipa::path(
    get,
    path = "/posts/description/{text}",
    tag = "Posts",
    operation_id = "searchPosts",
    security(("Bearer Token" = [])),
    params(("text" = String, Path, description = "Text to look for")),
    responses(
        (status = 200, description = "Matching posts", body = v0::ApiResponse<Vec<v0::FeedPost>>),
    )
)]
pub async fn req(
    user: User,
    State(search): State<SearchService>,
    Path(text): Path<String>,
) -> Result<Json<v0::ApiResponse<Vec<v0::FeedPost>>>> {
    let posts = search.search_posts(&text, &user.id).await?;
    Ok(Json(v0::ApiResponse::new(posts)))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;

    use crate::util::test::TestHarness;

    #[tokio::test]
    async fn no_match_is_an_empty_success() {
        let harness = TestHarness::new().await;
        let (_, token) = harness.new_user().await;
        harness
            .new_post(&token, "Wallet", "Brown leather wallet")
            .await;

        let (status, body) = harness
            .get("/posts/description/zzzzqqqxx", &token)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "success": true, "data": [] }));
    }

    #[tokio::test]
    async fn best_match_comes_first() {
        let harness = TestHarness::new().await;
        let (_, token) = harness.new_user().await;

        let wallet = harness
            .new_post(&token, "Wallet", "Brown leather wallet")
            .await;
        harness
            .new_post(&token, "Keys", "Set of car keys")
            .await;

        let (status, body) = harness
            .get("/posts/description/leather%20wallet", &token)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["_id"], wallet.as_str());
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }
}
