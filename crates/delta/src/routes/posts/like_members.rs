use axum::extract::{Path, State};
use lostfound_config::config;
use lostfound_database::{
    util::{id::validate_id, pagination::Pagination},
    Database, Like, User,
};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::util::{json::Json, query::Query};

/// # Fetch Likes
///
/// Page through the users who like a post.
#[utoipa::path(
    get,
    path = "/posts/{id}/like",
    tag = "Likes",
    operation_id = "fetchLikes",
    security(("Bearer Token" = [])),
    params(("id" = String, Path, description = "Post Id"), v0::OptionsPagination),
    responses(
        (status = 200, description = "Page of likers", body = v0::ApiResponse<v0::LikeMembers>),
        (status = 404, description = "No such post", body = lostfound_result::Error),
    )
)]
pub async fn req(
    user: User,
    State(db): State<Database>,
    Path(id): Path<String>,
    Query(options): Query<v0::OptionsPagination>,
) -> Result<Json<v0::ApiResponse<v0::LikeMembers>>> {
    validate_id("id", &id)?;

    let config = config().await;
    let pagination = Pagination::from_options(
        &options,
        config.api.pagination.default_like_page_size,
        config.api.pagination.max_page_size,
    )?;

    Like::members(&db, &id, &user.id, pagination)
        .await
        .map(v0::ApiResponse::new)
        .map(Json)
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::util::test::TestHarness;

    #[tokio::test]
    async fn pages_through_likers() {
        let harness = TestHarness::new().await;
        let (_, token) = harness.new_user().await;
        let id = harness.new_post(&token, "Ring", "Gold ring").await;

        let mut likers = vec![];
        for _ in 0..3 {
            let (user, user_token) = harness.new_user().await;
            harness
                .post(&format!("/posts/{id}/like"), &user_token, json!({}))
                .await;
            likers.push(user.id);
        }

        let (status, body) = harness
            .get(&format!("/posts/{id}/like?page=2&limit=2"), &token)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["count"], 3);
        assert_eq!(body["data"]["isLiked"], false);
        assert_eq!(body["data"]["page"], 2);
        assert_eq!(body["data"]["limit"], 2);
        assert_eq!(body["data"]["usersIDs"], json!([likers[2]]));
    }
}
