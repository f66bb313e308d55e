use std::{sync::Arc, time::Duration};

use lostfound_config::ServicesPush;
use lostfound_models::v0;
use lostfound_result::{create_error, Result};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PushError {
    #[error("push provider is not configured")]
    NotConfigured,
    #[error("push provider unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),
    #[error("push provider answered {0}")]
    Rejected(StatusCode),
}

#[derive(Serialize)]
struct Localised<'a> {
    en: &'a str,
}

#[derive(Serialize)]
struct PushRequest<'a> {
    app_id: &'a str,
    included_segments: [&'a str; 1],
    headings: Localised<'a>,
    contents: Localised<'a>,
}

/// Client for a OneSignal-style broadcast endpoint
#[derive(Clone)]
pub struct Push {
    pub endpoint: Arc<str>,
    pub app_id: Arc<str>,
    pub key: Arc<str>,
    pub timeout: Duration,
    pub client: Client,
}

impl Push {
    pub fn new(config: &ServicesPush) -> Self {
        Self {
            endpoint: Arc::from(config.endpoint.as_str()),
            app_id: Arc::from(config.app_id.as_str()),
            key: Arc::from(config.key.as_str()),
            timeout: Duration::from_millis(config.timeout_ms),
            client: Client::new(),
        }
    }

    async fn broadcast(
        &self,
        title: &str,
        message: &str,
    ) -> Result<v0::NotificationReceipt, PushError> {
        if self.app_id.is_empty() {
            return Err(PushError::NotConfigured);
        }

        let response = self
            .client
            .post(self.endpoint.as_ref())
            .timeout(self.timeout)
            .header("Authorization", format!("Basic {}", self.key))
            .json(&PushRequest {
                app_id: &self.app_id,
                included_segments: ["All"],
                headings: Localised { en: title },
                contents: Localised { en: message },
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PushError::Rejected(status));
        }

        // Providers differ in what they echo back, an unreadable body still counts as sent
        Ok(response.json().await.unwrap_or_default())
    }

    /// Send a notification to every subscribed device
    pub async fn notify(&self, title: &str, message: &str) -> Result<v0::NotificationReceipt> {
        self.broadcast(title, message).await.map_err(|err| {
            tracing::error!("Failed to send notification `{title}`: {err}");
            create_error!(ServiceUnavailable {
                service: "push".to_string()
            })
        })
    }
}
