use super::{DeliveryError, DeliveryReceipt};
use crate::config::VapidConfig;
use planner_domain::{ScheduledNotification, WebPushSubscription};
use serde::Serialize;
use web_push::{
    ContentEncoding, HyperWebPushClient, SubscriptionInfo, VapidSignatureBuilder,
    WebPushClient, WebPushError, WebPushMessage, WebPushMessageBuilder, URL_SAFE_NO_PAD,
};

/// Seconds the push service keeps an undelivered message around
const PUSH_TTL_SECS: u32 = 60 * 60 * 24;

/// What the service worker receives and displays
#[derive(Debug, Serialize)]
pub struct WebPushPayload {
    pub title: String,
    pub message: String,
    pub icon: String,
    pub badge: String,
    pub id: String,
}

impl WebPushPayload {
    pub fn new(notification: &ScheduledNotification) -> Self {
        Self {
            title: "Lembrete".into(),
            message: notification.message.clone(),
            icon: "/logo.svg".into(),
            badge: "/logo.svg".into(),
            id: notification.id.to_string(),
        }
    }
}

pub struct WebPushChannel {
    client: HyperWebPushClient,
    vapid: VapidConfig,
}

impl WebPushChannel {
    pub fn new(vapid: VapidConfig) -> Self {
        Self {
            client: HyperWebPushClient::new(),
            vapid,
        }
    }

    pub async fn send(
        &self,
        push: &WebPushSubscription,
        notification: &ScheduledNotification,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let message = self.build_message(push, notification)?;
        self.client
            .send(message)
            .await
            .map_err(into_delivery_error)?;
        Ok(DeliveryReceipt { status: Some(201) })
    }

    /// Encrypts the payload for the subscription and signs it with the VAPID key
    fn build_message(
        &self,
        push: &WebPushSubscription,
        notification: &ScheduledNotification,
    ) -> Result<WebPushMessage, DeliveryError> {
        let info = SubscriptionInfo::new(&push.endpoint, &push.keys.p256dh, &push.keys.auth);
        let payload = serde_json::to_vec(&WebPushPayload::new(notification))
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let mut signature =
            VapidSignatureBuilder::from_base64(&self.vapid.private_key, URL_SAFE_NO_PAD, &info)
                .map_err(into_delivery_error)?;
        signature.add_claim("sub", self.vapid.subject.as_str());
        let signature = signature.build().map_err(into_delivery_error)?;

        let mut builder = WebPushMessageBuilder::new(&info);
        builder.set_payload(ContentEncoding::Aes128Gcm, &payload);
        builder.set_vapid_signature(signature);
        builder.set_ttl(PUSH_TTL_SECS);
        builder.build().map_err(into_delivery_error)
    }
}

fn into_delivery_error(e: WebPushError) -> DeliveryError {
    match e {
        WebPushError::EndpointNotValid { .. } | WebPushError::EndpointNotFound { .. } => {
            DeliveryError::Gone
        }
        WebPushError::InvalidCryptoKeys { .. } | WebPushError::InvalidUri { .. } => {
            DeliveryError::InvalidSubscription(e.to_string())
        }
        other => DeliveryError::Transport(other.to_string()),
    }
}

#[cfg(test)]
pub(super) mod tests {
    use super::*;
    use planner_domain::{WebPushKeys, ID};

    pub(crate) const TEST_VAPID_PRIVATE: &str = "IQ9Ur0ykXoHS9gzfYX0aBjy9lvdrjx_PFUXmie9YRcY";
    pub(crate) const TEST_VAPID_PUBLIC: &str =
        "BMjQIp55pdbU8pfCBKyXcZjlmER_mXt5LqNrN1hrXbdBS5EnhIbMu3Au-RV53iIpztzNXkGI56BFB1udQ8Bq_H4";

    pub(crate) fn test_subscription(endpoint: &str) -> WebPushSubscription {
        WebPushSubscription {
            endpoint: endpoint.into(),
            keys: WebPushKeys {
                p256dh: "BH1HTeKM7-NwaLGHEqxeu2IamQaVVLkcsFHPIHmsCnqxcBHPQBprF41bEMOr3O1hUQ2jU1opNEm1F_lZV_sxMP8".into(),
                auth: "sBXU5_tIYz-5w7G2B25BEw".into(),
            },
        }
    }

    pub(crate) fn test_channel() -> WebPushChannel {
        WebPushChannel::new(VapidConfig {
            public_key: TEST_VAPID_PUBLIC.into(),
            private_key: TEST_VAPID_PRIVATE.into(),
            subject: "mailto:lembretes@example.com".into(),
        })
    }

    #[test]
    fn signs_and_encrypts_message() {
        let n = ScheduledNotification::new(ID::default(), "Live em 30 minutos".into(), 0, 0);
        let push = test_subscription("https://push.example.com/wpush/v2/abc");
        let message = test_channel().build_message(&push, &n).unwrap();

        assert_eq!(message.endpoint.host(), Some("push.example.com"));
        assert_eq!(message.ttl, PUSH_TTL_SECS);
        let payload = message.payload.expect("encrypted payload");
        assert!(!payload.content.is_empty());
        assert!(payload
            .crypto_headers
            .iter()
            .any(|(name, value)| *name == "Authorization" && value.starts_with("vapid t=")));
    }

    #[test]
    fn rejects_malformed_vapid_key() {
        let n = ScheduledNotification::new(ID::default(), "Live".into(), 0, 0);
        let push = test_subscription("https://push.example.com/wpush/v2/abc");
        let channel = WebPushChannel::new(VapidConfig {
            public_key: TEST_VAPID_PUBLIC.into(),
            private_key: "not a key".into(),
            subject: "mailto:lembretes@example.com".into(),
        });
        assert!(matches!(
            channel.build_message(&push, &n),
            Err(DeliveryError::InvalidSubscription(_))
        ));
    }

    #[test]
    fn payload_shape() {
        let n = ScheduledNotification::new(
            ID::default(),
            "Lembrete: Live em 30 minutos".into(),
            0,
            0,
        );
        let payload = serde_json::to_value(WebPushPayload::new(&n)).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({
                "title": "Lembrete",
                "message": "Lembrete: Live em 30 minutos",
                "icon": "/logo.svg",
                "badge": "/logo.svg",
                "id": n.id.to_string(),
            })
        );
    }
}
