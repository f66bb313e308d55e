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

/// # Fetch User Reposts
///
/// Posts a user reposted, newest first.
#[utoipa::path(
    get,
    path = "/posts/user/{id}/repost",
    tag = "Posts",
    operation_id = "fetchUserReposts",
    security(("Bearer Token" = [])),
    params(("id" = String, Path, description = "User Id"), v0::OptionsPagination),
    responses(
        (status = 200, description = "Posts reposted by the user", body = v0::ApiResponse<Vec<v0::FeedPost>>),
    )
)]
pub async fn req(
    user: User,
    State(db): State<Database>,
    Path(id): Path<String>,
    Query(options): Query<v0::OptionsPagination>,
) -> Result<Json<v0::ApiResponse<Vec<v0::FeedPost>>>> {
    let config = config().await;
    let mut query = FeedQuery::new(FeedSelector::RepostedBy(id), &user.id)
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
        "Reposted posts retrieved successfully",
        posts,
    )))
}
