use axum::extract::{Path, State};
use lostfound_database::{search::SearchService, User};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::util::json::Json;

/// # Find Users
///
/// Fuzzy search over user names, best match first.
#[utoipa::path(
    get,
    path = "/users/find/{username}",
    tag = "Users",
    operation_id = "findUsers",
    security(("Bearer Token" = [])),
    params(("username" = String, Path, description = "Name to look for")),
    responses(
        (status = 200, description = "Matching users", body = v0::ApiResponse<Vec<v0::UserSummary>>),
    )
)]
pub async fn req(
    _user: User,
    State(search): State<SearchService>,
    Path(username): Path<String>,
) -> Result<Json<v0::ApiResponse<Vec<v0::UserSummary>>>> {
    let users = search.search_users(&username).await?;
    Ok(Json(v0::ApiResponse::new(users)))
}
