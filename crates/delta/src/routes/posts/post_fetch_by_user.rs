use axum::extract::{Path, State};
use lostfound_config::config;
use lostfound_database::{
    feed::{compose_feed, FeedQuery, FeedSelector},
    util::pagination::Pagination,
    Database, User,
};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::util::{json::Json, query::Query};

/// # Fetch User Posts
///
/// Posts written by a user, newest first. Everything is returned unless a
/// page or limit is given.
#[utoipa::path(
    get,
    path = "/posts/user/{id}",
    tag = "Posts",
    operation_id = "fetchUserPosts",
    security(("Bearer Token" = [])),
    params(("id" = String, Path, description = "User Id"), v0::OptionsPagination),
    responses(
        (status = 200, description = "Posts by the user", body = v0::ApiResponse<Vec<v0::FeedPost>>),
        (status = 400, description = "Malformed id", body = lostfound_result::Error),
    )
)]
pub async fn req(
    user: User,
    State(db): State<Database>,
    Path(id): Path<String>,
    Query(options): Query<v0::OptionsPagination>,
) -> Result<Json<v0::ApiResponse<Vec<v0::FeedPost>>>> {
    let config = config().await;
    let mut query = FeedQuery::new(FeedSelector::ByAuthor(id), &user.id)
        .recent_comments(config.features.recent_comments);

    if options.page.is_some() || options.limit.is_some() {
        query = query.paginate(Pagination::from_options(
            &options,
            config.api.pagination.default_page_size,
            config.api.pagination.max_page_size,
        )?);
    }

    let posts = compose_feed(&db, query).await?;
    Ok(Json(v0::ApiResponse::with_message(
        "User posts retrieved successfully",
        posts,
    )))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;

    use crate::util::test::TestHarness;

    #[tokio::test]
    async fn only_the_authors_posts() {
        let harness = TestHarness::new().await;
        let (author, author_token) = harness.new_user().await;
        let (_, other_token) = harness.new_user().await;

        let first = harness.new_post(&author_token, "Keys", "Car keys").await;
        let second = harness.new_post(&author_token, "Bag", "Blue bag").await;
        harness.new_post(&other_token, "Phone", "Cracked phone").await;

        let (status, body) = harness
            .get(&format!("/posts/user/{}", author.id), &other_token)
            .await;
        assert_eq!(status, StatusCode::OK);

        let ids: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|post| post["_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec![second.as_str(), first.as_str()]);

        let (_, body) = harness
            .get(&format!("/posts/user/{}?limit=1", author.id), &other_token)
            .await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }
}
