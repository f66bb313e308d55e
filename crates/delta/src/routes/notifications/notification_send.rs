use axum::extract::State;
use lostfound_database::User;
use lostfound_models::v0;
use lostfound_result::Result;

use crate::services::push::Push;
use crate::util::json::{Json, Validate};

/// # Send Notification
///
/// Broadcast a push notification to every subscribed device.
#[utoipa::path(
    post,
    path = "/notifications",
    tag = "Services",
    operation_id = "sendNotification",
    security(("Bearer Token" = [])),
    request_body = v0::DataNotification,
    responses(
        (status = 200, description = "Provider receipt", body = v0::ApiResponse<v0::NotificationReceipt>),
        (status = 503, description = "Push provider unavailable", body = lostfound_result::Error),
    )
)]
pub async fn req(
    _user: User,
    State(push): State<Push>,
    Validate(Json(data)): Validate<Json<v0::DataNotification>>,
) -> Result<Json<v0::ApiResponse<v0::NotificationReceipt>>> {
    let receipt = push.notify(&data.title, &data.message).await?;
    Ok(Json(v0::ApiResponse::with_message(
        "Notification sent successfully",
        receipt,
    )))
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use axum::{
        http::{HeaderMap, StatusCode},
        routing::post,
        Router,
    };
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    use crate::util::test::TestHarness;

    async fn fake_provider() -> String {
        let app = Router::new().route(
            "/",
            post(|headers: HeaderMap, axum::Json(body): axum::Json<Value>| async move {
                let authorised = headers
                    .get("authorization")
                    .and_then(|value| value.to_str().ok())
                    == Some("Basic push-key");

                if authorised
                    && body["app_id"] == "app"
                    && body["included_segments"] == json!(["All"])
                    && body["headings"]["en"] == "Found"
                {
                    (StatusCode::OK, axum::Json(json!({ "id": "n1", "recipients": 3 })))
                } else {
                    (StatusCode::BAD_REQUEST, axum::Json(json!({ "errors": ["bad"] })))
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });

        format!("http://{address}/")
    }

    #[tokio::test]
    async fn broadcasts_to_the_provider() {
        let mut state = TestHarness::state().await;
        state.push.endpoint = Arc::from(fake_provider().await.as_str());
        state.push.app_id = Arc::from("app");
        state.push.key = Arc::from("push-key");

        let harness = TestHarness::from_state(state).await;
        let (_, token) = harness.new_user().await;

        let (status, body) = harness
            .post(
                "/notifications",
                &token,
                json!({ "title": "Found", "message": "A wallet was handed in" }),
            )
            .await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["data"], json!({ "id": "n1", "recipients": 3 }));
    }

    #[tokio::test]
    async fn unconfigured_provider_is_unavailable() {
        let harness = TestHarness::new().await;
        let (_, token) = harness.new_user().await;

        let (status, body) = harness
            .post(
                "/notifications",
                &token,
                json!({ "title": "Found", "message": "A wallet was handed in" }),
            )
            .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["data"]["service"], "push");
    }
}
