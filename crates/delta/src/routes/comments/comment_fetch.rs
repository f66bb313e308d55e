use axum::extract::{Path, State};
use lostfound_config::config;
use lostfound_database::{
    util::{id::validate_id, pagination::Pagination},
    Database, User,
};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::util::{json::Json, query::Query};

/// # Fetch Comments
///
/// Comments and replies on a post, newest first.
#[utoipa::path(
    get,
    path = "/posts/{id}/comments",
    tag = "Comments",
    operation_id = "fetchComments",
    security(("Bearer Token" = [])),
    params(("id" = String, Path, description = "Post Id"), v0::OptionsPagination),
    responses(
        (status = 200, description = "Page of comments", body = v0::ApiResponse<Vec<v0::Comment>>),
        (status = 404, description = "No such post", body = lostfound_result::Error),
    )
)]
pub async fn req(
    _user: User,
    State(db): State<Database>,
    Path(id): Path<String>,
    Query(options): Query<v0::OptionsPagination>,
) -> Result<Json<v0::ApiResponse<Vec<v0::Comment>>>> {
    validate_id("id", &id)?;

    let config = config().await;
    let pagination = Pagination::from_options(
        &options,
        config.api.pagination.default_comment_page_size,
        config.api.pagination.max_page_size,
    )?;

    db.fetch_post(&id).await?;
    let comments = db
        .fetch_comments(&id, pagination)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(v0::ApiResponse::new(comments)))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::util::test::TestHarness;

    #[tokio::test]
    async fn pages_through_comments() {
        let harness = TestHarness::new().await;
        let (_, token) = harness.new_user().await;
        let id = harness.new_post(&token, "Bottle", "Steel bottle").await;

        for index in 0..3 {
            harness
                .post(
                    &format!("/posts/{id}/comments"),
                    &token,
                    json!({ "comment": format!("comment {index}") }),
                )
                .await;
        }

        let (status, body) = harness
            .get(&format!("/posts/{id}/comments?page=1&limit=2"), &token)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"][0]["comment"], "comment 2");

        let (_, body) = harness
            .get(&format!("/posts/{id}/comments?page=2&limit=2"), &token)
            .await;
        assert_eq!(body["data"][0]["comment"], "comment 0");
    }
}
