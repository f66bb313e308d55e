use axum::extract::State;
use lostfound_config::config;
use lostfound_database::{
    feed::{compose_feed, FeedQuery, FeedSelector},
    util::pagination::Pagination,
    Database, User,
};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::util::{json::Json, query::Query};

/// # Fetch Feed
///
/// Newest posts first, each with its author, like state, recent comments
/// and repost count.
#[utoipa::path(
    get,
    path = "/posts",
    tag = "Posts",
    operation_id = "fetchFeed",
    security(("Bearer Token" = [])),
    params(v0::OptionsPagination),
    responses(
        (status = 200, description = "Page of posts", body = v0::ApiResponse<Vec<v0::FeedPost>>),
        (status = 422, description = "Invalid page selection", body = lostfound_result::Error),
    )
)]
pub async fn req(
    user: User,
    State(db): State<Database>,
    Query(options): Query<v0::OptionsPagination>,
) -> Result<Json<v0::ApiResponse<Vec<v0::FeedPost>>>> {
    let config = config().await;
    let pagination = Pagination::from_options(
        &options,
        config.api.pagination.default_page_size,
        config.api.pagination.max_page_size,
    )?;

    let posts = compose_feed(
        &db,
        FeedQuery::new(FeedSelector::All, &user.id)
            .paginate(pagination)
            .recent_comments(config.features.recent_comments),
    )
    .await?;

    Ok(Json(v0::ApiResponse::with_message(
        "Posts retrieved successfully",
        posts,
    )))
}
