use axum::{extract::State, http::StatusCode};
use chrono::TimeDelta;
use lostfound_config::config;
use lostfound_database::{Database, Status, User};
use lostfound_models::v0;
use lostfound_result::{create_error, Result};

use crate::util::json::{Json, Validate};

/// # Post Status
///
/// Share an image status that disappears after a while. Only one status
/// may be active at a time.
#[utoipa::path(
    post,
    path = "/statuses",
    tag = "Statuses",
    operation_id = "createStatus",
    security(("Bearer Token" = [])),
    request_body = v0::DataCreateStatus,
    responses(
        (status = 201, description = "Created status", body = v0::ApiResponse<v0::StatusWithUser>),
        (status = 409, description = "A status is already active", body = lostfound_result::Error),
    )
)]
pub async fn req(
    user: User,
    State(db): State<Database>,
    Validate(Json(data)): Validate<Json<v0::DataCreateStatus>>,
) -> Result<(StatusCode, Json<v0::ApiResponse<v0::StatusWithUser>>)> {
    let config = config().await;
    let status = Status::create(
        &db,
        &user,
        data,
        TimeDelta::hours(config.features.status_lifetime_hours),
    )
    .await?;

    let status = Status::with_users(&db, vec![status])
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| create_error!(InternalError))?;

    Ok((
        StatusCode::CREATED,
        Json(v0::ApiResponse::with_message(
            "Status created successfully",
            status,
        )),
    ))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::util::test::TestHarness;

    #[tokio::test]
    async fn one_active_status() {
        let harness = TestHarness::new().await;
        let (user, token) = harness.new_user().await;
        let status = json!({ "status": "https://cdn.example.com/s/1.png", "text": "Found keys at the park" });

        let (code, body) = harness.post("/statuses", &token, status.clone()).await;
        assert_eq!(code, StatusCode::CREATED, "{body}");
        assert_eq!(body["data"]["userId"], user.id.as_str());
        assert_eq!(body["data"]["user"]["name"], user.name.as_str());

        let (code, body) = harness.post("/statuses", &token, status).await;
        assert_eq!(code, StatusCode::CONFLICT);
        assert_eq!(body["data"]["type"], "StatusAlreadyExists");
    }

    #[tokio::test]
    async fn image_must_be_a_url() {
        let harness = TestHarness::new().await;
        let (_, token) = harness.new_user().await;

        let (code, body) = harness
            .post("/statuses", &token, json!({ "status": "not a url", "text": "Hi" }))
            .await;
        assert_eq!(code, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["data"]["details"][0]["field"], "status");
    }
}
