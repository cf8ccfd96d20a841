use http::header::{HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::convert::TryFrom;
use thiserror::Error;
use url::Url;

/// Where a `ScheduledNotification` should be delivered.
///
/// Stored with an explicit `type` tag. Payloads coming from clients are
/// allowed to omit the tag, in which case the channel is inferred from the
/// shape of the object (see `TryFrom<Value>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "TaggedSubscription")]
pub enum Subscription {
    WebPush(WebPushSubscription),
    Webhook(WebhookSubscription),
    Fcm(FcmSubscription),
}

/// A browser push subscription as returned by `PushSubscription.toJSON()`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebPushSubscription {
    pub endpoint: String,
    pub keys: WebPushKeys,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebPushKeys {
    pub p256dh: String,
    pub auth: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookSubscription {
    pub url: String,
    /// Extra headers merged into every delivery request
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FcmSubscription {
    pub token: String,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TaggedSubscription {
    WebPush(WebPushSubscription),
    Webhook(WebhookSubscription),
    Fcm(FcmSubscription),
}

impl From<Subscription> for TaggedSubscription {
    fn from(s: Subscription) -> Self {
        match s {
            Subscription::WebPush(s) => Self::WebPush(s),
            Subscription::Webhook(s) => Self::Webhook(s),
            Subscription::Fcm(s) => Self::Fcm(s),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidSubscriptionError {
    #[error("Subscription must be a json object")]
    NotAnObject,
    #[error(
        "Subscription shape is not recognized. Expected `endpoint` and `keys`, a `url` or `provider: fcm`"
    )]
    Unrecognized,
    #[error("Malformed {channel} subscription: {reason}")]
    Malformed {
        channel: &'static str,
        reason: String,
    },
}

impl Subscription {
    pub fn channel(&self) -> &'static str {
        match self {
            Self::WebPush(_) => "web_push",
            Self::Webhook(_) => "webhook",
            Self::Fcm(_) => "fcm",
        }
    }

    pub fn is_webhook(&self) -> bool {
        matches!(self, Self::Webhook(_))
    }
}

fn malformed(channel: &'static str, reason: impl ToString) -> InvalidSubscriptionError {
    InvalidSubscriptionError::Malformed {
        channel,
        reason: reason.to_string(),
    }
}

fn parse_http_url(channel: &'static str, raw: &str) -> Result<(), InvalidSubscriptionError> {
    let url = Url::parse(raw).map_err(|e| malformed(channel, e))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(malformed(
            channel,
            format!("unsupported url scheme `{}`", scheme),
        )),
    }
}

fn validate_headers(
    channel: &'static str,
    headers: &BTreeMap<String, String>,
) -> Result<(), InvalidSubscriptionError> {
    for (name, value) in headers {
        HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| malformed(channel, format!("invalid header name `{}`", name)))?;
        HeaderValue::from_str(value)
            .map_err(|_| malformed(channel, format!("invalid value for header `{}`", name)))?;
    }
    Ok(())
}

impl TryFrom<Value> for Subscription {
    type Error = InvalidSubscriptionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let obj = value
            .as_object()
            .ok_or(InvalidSubscriptionError::NotAnObject)?;
        let tag = obj.get("type").and_then(Value::as_str);
        let has_url = obj
            .get("url")
            .and_then(Value::as_str)
            .map(|url| !url.is_empty())
            .unwrap_or(false);

        if tag == Some("web_push") || (obj.contains_key("endpoint") && obj.contains_key("keys")) {
            let sub: WebPushSubscription =
                serde_json::from_value(value).map_err(|e| malformed("web_push", e))?;
            parse_http_url("web_push", &sub.endpoint)?;
            if sub.keys.p256dh.is_empty() || sub.keys.auth.is_empty() {
                return Err(malformed("web_push", "empty encryption keys"));
            }
            Ok(Self::WebPush(sub))
        } else if tag == Some("webhook") || has_url {
            let sub: WebhookSubscription =
                serde_json::from_value(value).map_err(|e| malformed("webhook", e))?;
            parse_http_url("webhook", &sub.url)?;
            validate_headers("webhook", &sub.headers)?;
            Ok(Self::Webhook(sub))
        } else if tag == Some("fcm") || obj.get("provider").and_then(Value::as_str) == Some("fcm")
        {
            let sub: FcmSubscription =
                serde_json::from_value(value).map_err(|e| malformed("fcm", e))?;
            if sub.token.is_empty() {
                return Err(malformed("fcm", "empty token"));
            }
            Ok(Self::Fcm(sub))
        } else {
            Err(InvalidSubscriptionError::Unrecognized)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn infers_web_push_from_endpoint_and_keys() {
        let sub = Subscription::try_from(json!({
            "endpoint": "https://push.example.com/send/abc",
            "expirationTime": null,
            "keys": { "p256dh": "BPk", "auth": "xyz" }
        }))
        .expect("Valid web push subscription");
        assert_eq!(sub.channel(), "web_push");
    }

    #[test]
    fn infers_webhook_from_url() {
        let sub = Subscription::try_from(json!({
            "url": "https://hooks.example.com/reminders",
            "headers": { "authorization": "Bearer 123" }
        }))
        .expect("Valid webhook subscription");
        match sub {
            Subscription::Webhook(hook) => {
                assert_eq!(hook.url, "https://hooks.example.com/reminders");
                assert_eq!(hook.headers.get("authorization").unwrap(), "Bearer 123");
            }
            other => panic!("Expected webhook, got {:?}", other),
        }
    }

    #[test]
    fn infers_fcm_from_provider() {
        let sub = Subscription::try_from(json!({ "provider": "fcm", "token": "device-token" }))
            .expect("Valid fcm subscription");
        assert_eq!(sub.channel(), "fcm");
    }

    #[test]
    fn rejects_unrecognized_shapes() {
        assert_eq!(
            Subscription::try_from(json!({ "foo": "bar" })),
            Err(InvalidSubscriptionError::Unrecognized)
        );
        assert_eq!(
            Subscription::try_from(json!({})),
            Err(InvalidSubscriptionError::Unrecognized)
        );
        assert_eq!(
            Subscription::try_from(json!({ "url": "" })),
            Err(InvalidSubscriptionError::Unrecognized)
        );
        assert_eq!(
            Subscription::try_from(json!("https://example.com")),
            Err(InvalidSubscriptionError::NotAnObject)
        );
    }

    #[test]
    fn rejects_malformed_known_shapes() {
        assert!(Subscription::try_from(json!({ "url": "ftp://example.com" })).is_err());
        assert!(Subscription::try_from(json!({ "url": "not a url" })).is_err());
        assert!(Subscription::try_from(json!({ "type": "webhook" })).is_err());
        assert!(Subscription::try_from(json!({
            "endpoint": "https://push.example.com",
            "keys": { "p256dh": "" , "auth": "" }
        }))
        .is_err());
        assert!(Subscription::try_from(json!({ "provider": "fcm" })).is_err());
    }

    #[test]
    fn rejects_webhook_headers_that_cannot_be_sent() {
        assert_eq!(
            Subscription::try_from(json!({
                "url": "https://hooks.example.com",
                "headers": { "bad header": "x" }
            })),
            Err(InvalidSubscriptionError::Malformed {
                channel: "webhook",
                reason: "invalid header name `bad header`".into()
            })
        );
        assert!(Subscription::try_from(json!({
            "url": "https://hooks.example.com",
            "headers": { "x-token": "line\nbreak" }
        }))
        .is_err());
        assert!(Subscription::try_from(json!({
            "url": "https://hooks.example.com",
            "headers": { "Content-Type": "application/vnd.lembrete+json" }
        }))
        .is_ok());
    }

    #[test]
    fn serializes_with_explicit_tag() {
        let sub = Subscription::Webhook(WebhookSubscription {
            url: "https://hooks.example.com".into(),
            headers: Default::default(),
        });
        let value = serde_json::to_value(&sub).unwrap();
        assert_eq!(
            value,
            json!({ "type": "webhook", "url": "https://hooks.example.com" })
        );
        let back: Subscription = serde_json::from_value(value).unwrap();
        assert_eq!(back, sub);
    }
}
