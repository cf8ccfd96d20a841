use super::{DeliveryError, DeliveryReceipt};
use planner_domain::{format_timestamp, ScheduledNotification, WebhookSubscription};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::warn;

/// Body POSTed to webhook subscriptions
#[derive(Debug, Serialize)]
pub struct WebhookPayload {
    pub id: String,
    pub user_id: String,
    pub message: String,
    pub send_at: String,
}

impl WebhookPayload {
    pub fn new(notification: &ScheduledNotification) -> Self {
        Self {
            id: notification.id.to_string(),
            user_id: notification.user_id.to_string(),
            message: notification.message.clone(),
            send_at: format_timestamp(notification.send_at),
        }
    }
}

pub struct WebhookChannel {
    client: Client,
}

impl WebhookChannel {
    pub fn new(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                warn!("Unable to build webhook client with timeout: {:?}", e);
                Client::new()
            });
        Self { client }
    }

    pub async fn send(
        &self,
        hook: &WebhookSubscription,
        notification: &ScheduledNotification,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let res = self
            .client
            .post(&hook.url)
            .headers(request_headers(hook)?)
            .json(&WebhookPayload::new(notification))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeliveryError::Timeout
                } else {
                    DeliveryError::Transport(e.to_string())
                }
            })?;

        let status = res.status();
        if status.is_success() {
            return Ok(DeliveryReceipt {
                status: Some(status.as_u16()),
            });
        }
        let body = res.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            format!("status_{}", status.as_u16())
        } else {
            body
        };
        Err(DeliveryError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

/// Subscription headers override the defaults, matching names case-insensitively
fn request_headers(hook: &WebhookSubscription) -> Result<HeaderMap, DeliveryError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for (name, value) in &hook.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| DeliveryError::InvalidSubscription(e.to_string()))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| DeliveryError::InvalidSubscription(e.to_string()))?;
        headers.insert(name, value);
    }
    Ok(headers)
}
