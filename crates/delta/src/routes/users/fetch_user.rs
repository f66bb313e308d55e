use axum::extract::{Path, State};
use lostfound_database::{util::id::validate_id, Database, User};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::util::json::Json;

/// # Fetch User
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    operation_id = "fetchUser",
    security(("Bearer Token" = [])),
    params(("id" = String, Path, description = "User Id")),
    responses(
        (status = 200, description = "The user", body = v0::ApiResponse<v0::UserSummary>),
        (status = 404, description = "No such user", body = lostfound_result::Error),
    )
)]
pub async fn req(
    _user: User,
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Json<v0::ApiResponse<v0::UserSummary>>> {
    validate_id("id", &id)?;

    db.fetch_user(&id)
        .await
        .map(|user| Json(v0::ApiResponse::new(user.into_summary())))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;

    use crate::util::test::TestHarness;

    #[tokio::test]
    async fn summary_leaves_out_secrets() {
        let harness = TestHarness::new().await;
        let (user, token) = harness.new_user().await;

        let (status, body) = harness.get(&format!("/users/{}", user.id), &token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["user_id"], user.id.as_str());
        assert_eq!(body["data"]["email"], user.email.as_str());
        assert!(body["data"].get("password").is_none());
        assert!(body["data"].get("token").is_none());
    }
}
