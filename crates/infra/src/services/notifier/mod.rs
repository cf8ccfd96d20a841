mod web_push;
mod webhook;

use crate::config::Config;
use planner_domain::{ScheduledNotification, Subscription};
use thiserror::Error;
pub use web_push::{WebPushChannel, WebPushPayload};
pub use webhook::{WebhookChannel, WebhookPayload};

/// What a channel reports back after accepting a notification
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryReceipt {
    pub status: Option<u16>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeliveryError {
    #[error("timeout")]
    Timeout,
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("{0}")]
    Transport(String),
    /// The push service says the subscription no longer exists
    #[error("subscription_gone")]
    Gone,
    #[error("web_push_not_configured")]
    WebPushNotConfigured,
    #[error("{0} delivery is not supported")]
    Unsupported(&'static str),
    #[error("invalid_subscription: {0}")]
    InvalidSubscription(String),
    #[error("no_subscription")]
    NoSubscription,
}

impl DeliveryError {
    /// Permanent errors will never succeed on a retry
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::Gone | Self::Unsupported(_) | Self::InvalidSubscription(_) | Self::NoSubscription
        )
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Delivers a single notification over the channel of the given subscription
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    async fn deliver(
        &self,
        subscription: &Subscription,
        notification: &ScheduledNotification,
    ) -> Result<DeliveryReceipt, DeliveryError>;
}

/// Routes each notification to the channel matching its subscription variant
pub struct ChannelNotifier {
    webhook: WebhookChannel,
    web_push: Option<WebPushChannel>,
}

impl ChannelNotifier {
    pub fn new(config: &Config) -> Self {
        Self {
            webhook: WebhookChannel::new(config.notifications.webhook_timeout_secs),
            web_push: config.vapid.clone().map(WebPushChannel::new),
        }
    }
}

#[async_trait::async_trait]
impl INotifier for ChannelNotifier {
    async fn deliver(
        &self,
        subscription: &Subscription,
        notification: &ScheduledNotification,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        match subscription {
            Subscription::Webhook(hook) => self.webhook.send(hook, notification).await,
            Subscription::WebPush(push) => match &self.web_push {
                Some(channel) => channel.send(push, notification).await,
                None => Err(DeliveryError::WebPushNotConfigured),
            },
            Subscription::Fcm(_) => Err(DeliveryError::Unsupported("fcm")),
        }
    }
}
