use axum::{extract::State, http::StatusCode};
use lostfound_database::{Database, Report, User};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::util::json::{Json, Validate};

/// # Report Content
///
/// Report a post, comment or user. Reports against the same target are
/// collected together and each user may report a target once.
#[utoipa::path(
    post,
    path = "/reports",
    tag = "Reports",
    operation_id = "createReport",
    security(("Bearer Token" = [])),
    request_body = v0::DataReportContent,
    responses(
        (status = 201, description = "Reports against the target", body = v0::ApiResponse<v0::Report>),
        (status = 404, description = "No such target", body = lostfound_result::Error),
        (status = 409, description = "Already reported", body = lostfound_result::Error),
    )
)]
pub async fn req(
    user: User,
    State(db): State<Database>,
    Validate(Json(data)): Validate<Json<v0::DataReportContent>>,
) -> Result<(StatusCode, Json<v0::ApiResponse<v0::Report>>)> {
    let report = Report::submit(&db, &user, data).await?;

    Ok((
        StatusCode::CREATED,
        Json(v0::ApiResponse::with_message(
            "Report submitted successfully",
            report.into(),
        )),
    ))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::util::test::TestHarness;

    #[tokio::test]
    async fn second_report_conflicts() {
        let harness = TestHarness::new().await;
        let (_, author_token) = harness.new_user().await;
        let (reporter, token) = harness.new_user().await;
        let (_, other_token) = harness.new_user().await;
        let post = harness.new_post(&author_token, "Phone", "Cracked phone").await;

        let report = json!({ "type": "post", "id": post, "reason": "spam" });

        let (status, body) = harness.post("/reports", &token, report.clone()).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert_eq!(body["data"]["usersIDS"], json!([reporter.id]));
        assert_eq!(body["data"]["reason"], json!(["spam"]));

        let (status, body) = harness.post("/reports", &token, report.clone()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["data"]["type"], "AlreadyReported");

        let (status, body) = harness.post("/reports", &other_token, report).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["usersIDS"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_target_is_not_found() {
        let harness = TestHarness::new().await;
        let (_, token) = harness.new_user().await;

        let (status, body) = harness
            .post(
                "/reports",
                &token,
                json!({ "type": "user", "id": TestHarness::rand_string(), "reason": "abuse" }),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["data"]["type"], "UnknownUser");
    }

    #[tokio::test]
    async fn reports_are_ratelimited() {
        let harness = TestHarness::new().await;
        let (_, token) = harness.new_user().await;
        let limit = lostfound_config::config().await.ratelimits.reports;

        for _ in 0..limit {
            let (status, _) = harness.post("/reports", &token, json!({})).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        }

        let (status, body) = harness.post("/reports", &token, json!({})).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["data"]["type"], "Ratelimited");
        assert_eq!(body["statuscode"], 429);
    }
}
