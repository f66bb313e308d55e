use std::{sync::Arc, time::Duration};

use futures::future::join_all;
use lostfound_config::ServicesClassifier;
use lostfound_models::v0;
use lostfound_result::{create_error, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Nothing answered in time
    #[error("classifier unreachable: {0}")]
    Unreachable(reqwest::Error),
    /// The classifier answered but refused this image
    #[error("classifier answered {0}")]
    Rejected(StatusCode),
    /// The classifier answered with something we cannot read
    #[error("unexpected classifier response: {0}")]
    Malformed(reqwest::Error),
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
struct InferenceLabel {
    label: String,
    score: f64,
}

/// Client for a HuggingFace-style image classification endpoint
#[derive(Clone)]
pub struct Classifier {
    pub endpoint: Arc<str>,
    pub key: Arc<str>,
    pub timeout: Duration,
    pub client: Client,
}

impl Classifier {
    pub fn new(config: &ServicesClassifier) -> Self {
        Self {
            endpoint: Arc::from(config.endpoint.as_str()),
            key: Arc::from(config.key.as_str()),
            timeout: Duration::from_millis(config.timeout_ms),
            client: Client::new(),
        }
    }

    /// Labels for one image URL, best first
    pub async fn classify(&self, image: &str) -> Result<Vec<v0::Prediction>, ClassifierError> {
        let mut request = self
            .client
            .post(self.endpoint.as_ref())
            .timeout(self.timeout)
            .json(&InferenceRequest { inputs: image });

        if !self.key.is_empty() {
            request = request.bearer_auth(self.key.as_ref());
        }

        let response = request.send().await.map_err(ClassifierError::Unreachable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifierError::Rejected(status));
        }

        let mut labels: Vec<InferenceLabel> = response
            .json()
            .await
            .map_err(ClassifierError::Malformed)?;

        labels.sort_by(|a, b| b.score.total_cmp(&a.score));

        Ok(labels
            .into_iter()
            .map(|InferenceLabel { label, score }| v0::Prediction { label, score })
            .collect())
    }

    /// Classify every image concurrently
    ///
    /// Images the classifier refuses are reported inline. If the classifier
    /// cannot be reached at all the whole request fails.
    pub async fn predict(&self, images: Vec<String>) -> Result<Vec<v0::ImagePrediction>> {
        let outcomes = join_all(images.iter().map(|image| self.classify(image))).await;

        let mut predictions = Vec::with_capacity(images.len());
        for (image, outcome) in images.into_iter().zip(outcomes) {
            match outcome {
                Ok(labels) => predictions.push(v0::ImagePrediction {
                    image,
                    predictions: labels,
                    error: None,
                }),
                Err(ClassifierError::Unreachable(err)) => {
                    tracing::error!("Classifier unreachable: {err}");
                    return Err(create_error!(ServiceUnavailable {
                        service: "classifier".to_string()
                    }));
                }
                Err(err) => {
                    tracing::warn!("Could not classify {image}: {err}");
                    predictions.push(v0::ImagePrediction {
                        image,
                        predictions: vec![],
                        error: Some(err.to_string()),
                    });
                }
            }
        }

        Ok(predictions)
    }
}
