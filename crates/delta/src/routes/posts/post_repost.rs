use axum::extract::{Path, State};
use lostfound_config::config;
use lostfound_database::{
    feed::{compose_feed, FeedQuery, FeedSelector},
    util::id::validate_id,
    Database, Post, User,
};
use lostfound_models::v0;
use lostfound_result::{create_error, Result};

use crate::util::json::Json;

/// # Repost
///
/// Share a post to your profile. Whether reposting again counts twice
/// depends on the configured repost policy.
#[utoipa::path(
    post,
    path = "/posts/{id}/repost",
    tag = "Posts",
    operation_id = "repostPost",
    security(("Bearer Token" = [])),
    params(("id" = String, Path, description = "Post Id")),
    responses(
        (status = 200, description = "Post after the repost", body = v0::ApiResponse<v0::FeedPost>),
        (status = 404, description = "No such post", body = lostfound_result::Error),
    )
)]
pub async fn req(
    user: User,
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Json<v0::ApiResponse<v0::FeedPost>>> {
    validate_id("id", &id)?;

    let config = config().await;
    Post::repost(&db, &id, &user.id, config.features.repost_policy).await?;

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
        "Post reposted successfully",
        post,
    )))
}
