use axum::extract::State;
use lostfound_database::User;
use lostfound_models::v0;
use lostfound_result::Result;

use crate::services::classifier::Classifier;
use crate::util::json::{Json, Validate};

/// # Predict Items
///
/// Ask the image classifier what the pictured items are. Images it cannot
/// classify carry an error instead of labels.
#[utoipa::path(
    post,
    path = "/predict",
    tag = "Services",
    operation_id = "predictItems",
    security(("Bearer Token" = [])),
    request_body = v0::DataPredict,
    responses(
        (status = 200, description = "Labels per image", body = v0::ApiResponse<Vec<v0::ImagePrediction>>),
        (status = 503, description = "Classifier unreachable", body = lostfound_result::Error),
    )
)]
pub async fn req(
    _user: User,
    State(classifier): State<Classifier>,
    Validate(Json(data)): Validate<Json<v0::DataPredict>>,
) -> Result<Json<v0::ApiResponse<Vec<v0::ImagePrediction>>>> {
    let predictions = classifier.predict(data.images).await?;
    Ok(Json(v0::ApiResponse::with_message(
        "Images classified",
        predictions,
    )))
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use axum::{http::StatusCode, routing::post, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    use crate::util::test::TestHarness;

    async fn fake_classifier() -> String {
        let app = Router::new().route(
            "/",
            post(|axum::Json(body): axum::Json<Value>| async move {
                match body["inputs"].as_str() {
                    Some(image) if image.ends_with("broken.png") => (
                        StatusCode::BAD_REQUEST,
                        axum::Json(json!({ "error": "cannot identify image" })),
                    ),
                    _ => (
                        StatusCode::OK,
                        axum::Json(json!([
                            { "label": "wallet", "score": 0.2 },
                            { "label": "purse", "score": 0.7 }
                        ])),
                    ),
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });

        format!("http://{address}/")
    }

    #[tokio::test]
    async fn labels_each_image() {
        let mut state = TestHarness::state().await;
        state.classifier.endpoint = Arc::from(fake_classifier().await.as_str());

        let harness = TestHarness::from_state(state).await;
        let (_, token) = harness.new_user().await;

        let (status, body) = harness
            .post(
                "/predict",
                &token,
                json!({ "images": ["https://cdn.example.com/a.png", "https://cdn.example.com/broken.png"] }),
            )
            .await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["data"][0]["predictions"][0]["label"], "purse");
        assert_eq!(body["data"][0]["predictions"][1]["label"], "wallet");
        assert!(body["data"][0].get("error").is_none());
        assert_eq!(body["data"][1]["predictions"], json!([]));
        assert!(body["data"][1]["error"].as_str().unwrap().contains("400"));
    }

    #[tokio::test]
    async fn unreachable_classifier_is_unavailable() {
        let mut state = TestHarness::state().await;
        state.classifier.endpoint = Arc::from("http://127.0.0.1:1/");

        let harness = TestHarness::from_state(state).await;
        let (_, token) = harness.new_user().await;

        let (status, body) = harness
            .post(
                "/predict",
                &token,
                json!({ "images": ["https://cdn.example.com/a.png"] }),
            )
            .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["data"]["type"], "ServiceUnavailable");
        assert_eq!(body["data"]["service"], "classifier");
    }

    #[tokio::test]
    async fn needs_at_least_one_image() {
        let harness = TestHarness::new().await;
        let (_, token) = harness.new_user().await;

        let (status, body) = harness
            .post("/predict", &token, json!({ "images": [] }))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["data"]["details"][0]["field"], "images");
    }
}
