use axum::extract::{Path, State};
use lostfound_database::{util::id::validate_id, Database, User};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::util::json::Json;

/// # Fetch Report
#[utoipa::path(
    get,
    path = "/reports/{id}",
    tag = "Reports",
    operation_id = "fetchReport",
    security(("Bearer Token" = [])),
    params(("id" = String, Path, description = "Report Id")),
    responses(
        (status = 200, description = "The report", body = v0::ApiResponse<v0::Report>),
        (status = 404, description = "No such report", body = lostfound_result::Error),
    )
)]
pub async fn req(
    _user: User,
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Json<v0::ApiResponse<v0::Report>>> {
    validate_id("id", &id)?;

    db.fetch_report(&id)
        .await
        .map(|report| Json(v0::ApiResponse::new(report.into())))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::util::test::TestHarness;

    #[tokio::test]
    async fn listed_and_fetched() {
        let harness = TestHarness::new().await;
        let (target, token) = harness.new_user().await;
        let (_, reporter_token) = harness.new_user().await;

        let (_, body) = harness
            .post(
                "/reports",
                &reporter_token,
                json!({ "type": "user", "id": target.id, "reason": "abuse", "description": "Rude messages" }),
            )
            .await;
        let id = body["data"]["_id"].as_str().unwrap().to_string();

        let (status, body) = harness.get("/reports", &token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["_id"], id.as_str());

        let (status, body) = harness.get(&format!("/reports/{id}"), &token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["type"], "user");
        assert_eq!(body["data"]["description"], json!(["Rude messages"]));

        let (status, _) = harness
            .get(&format!("/reports/{}", TestHarness::rand_string()), &token)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
