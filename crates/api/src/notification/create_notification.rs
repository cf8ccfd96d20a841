use crate::error::PlannerError;
use crate::shared::{
    auth::protect_service_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::DateTime;
use planner_api_structs::create_notification::*;
use planner_domain::{InvalidSubscriptionError, ScheduledNotification, Subscription, ID};
use planner_infra::PlannerContext;
use serde_json::Value;
use std::convert::TryFrom;

pub async fn create_notification_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    protect_service_route(&http_req, &ctx)?;

    let usecase = CreateNotificationUseCase::new(body.0, false);

    execute(usecase, &ctx)
        .await
        .map(|notification| HttpResponse::Ok().json(APIResponse::new(notification)))
        .map_err(PlannerError::from)
}

/// Schedules a notification with an explicit delivery target
#[derive(Debug)]
pub struct CreateNotificationUseCase {
    pub user_id: Option<ID>,
    pub subscription: Option<Value>,
    pub message: Option<String>,
    /// RFC 3339
    pub send_at: Option<String>,
    /// Reject every subscription that is not a webhook
    pub webhook_only: bool,
}

impl CreateNotificationUseCase {
    pub fn new(body: RequestBody, webhook_only: bool) -> Self {
        Self {
            user_id: body.user_id,
            subscription: body.subscription,
            message: body.message,
            send_at: body.send_at,
            webhook_only,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    MissingFields,
    InvalidSendAt(String),
    InvalidSubscription(InvalidSubscriptionError),
    OnlyWebhooksAccepted,
    StorageError,
}

impl From<UseCaseError> for PlannerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MissingFields => Self::BadClientData(
                "Missing required fields: user_id, subscription, message, send_at".into(),
            ),
            UseCaseError::InvalidSendAt(send_at) => Self::BadClientData(format!(
                "send_at: {} is not a valid RFC 3339 timestamp",
                send_at
            )),
            UseCaseError::InvalidSubscription(e) => Self::BadClientData(e.to_string()),
            UseCaseError::OnlyWebhooksAccepted => Self::BadClientData(
                "Only webhook subscriptions (subscription.url) are accepted".into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateNotificationUseCase {
    type Response = ScheduledNotification;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateNotification";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let message = self
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty());
        let (user_id, subscription, message, send_at) = match (
            &self.user_id,
            &self.subscription,
            message,
            &self.send_at,
        ) {
            (Some(user_id), Some(subscription), Some(message), Some(send_at)) => {
                (user_id, subscription, message, send_at)
            }
            _ => return Err(UseCaseError::MissingFields),
        };

        let subscription = Subscription::try_from(subscription.clone())
            .map_err(UseCaseError::InvalidSubscription)?;
        if self.webhook_only && !subscription.is_webhook() {
            return Err(UseCaseError::OnlyWebhooksAccepted);
        }
        let send_at = DateTime::parse_from_rfc3339(send_at.trim())
            .map_err(|_| UseCaseError::InvalidSendAt(send_at.clone()))?
            .timestamp_millis();

        let mut notification = ScheduledNotification::new(
            user_id.clone(),
            message.to_string(),
            send_at,
            ctx.sys.get_timestamp_millis(),
        );
        notification.subscription = Some(subscription);

        ctx.repos
            .notifications
            .insert(&notification)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(notification)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn usecase(subscription: Value, webhook_only: bool) -> CreateNotificationUseCase {
        CreateNotificationUseCase {
            user_id: Some(ID::default()),
            subscription: Some(subscription),
            message: Some("Lembrete: Dentista em 30 minutos".into()),
            send_at: Some("2026-10-19T09:30:00.000Z".into()),
            webhook_only,
        }
    }

    #[actix_web::test]
    async fn creates_notification_with_any_subscription_shape() {
        let ctx = PlannerContext::create_inmemory();
        let shapes = vec![
            json!({ "url": "https://hooks.example.com/a" }),
            json!({ "endpoint": "https://push.example.com/x", "keys": { "p256dh": "k", "auth": "a" } }),
            json!({ "provider": "fcm", "token": "device" }),
        ];
        for shape in shapes {
            let mut usecase = usecase(shape, false);
            let notification = usecase.execute(&ctx).await.unwrap();
            assert_eq!(notification.send_at, 1_792_402_200_000);
            assert!(!notification.sent);
            assert!(ctx.repos.notifications.find(&notification.id).await.is_some());
        }
    }

    #[actix_web::test]
    async fn subscribe_only_accepts_webhooks() {
        let ctx = PlannerContext::create_inmemory();
        let mut usecase = usecase(
            json!({ "endpoint": "https://push.example.com/x", "keys": { "p256dh": "k", "auth": "a" } }),
            true,
        );
        assert_eq!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::OnlyWebhooksAccepted)
        );

        let mut usecase = usecase_with_headers();
        let notification = usecase.execute(&ctx).await.unwrap();
        assert!(notification.subscription.unwrap().is_webhook());
    }

    fn usecase_with_headers() -> CreateNotificationUseCase {
        usecase(
            json!({ "url": "https://hooks.example.com/a", "headers": { "x-api-key": "123" } }),
            true,
        )
    }

    #[actix_web::test]
    async fn rejects_incomplete_or_invalid_payloads() {
        let ctx = PlannerContext::create_inmemory();

        let mut missing_message = usecase(json!({ "url": "https://hooks.example.com" }), false);
        missing_message.message = Some("   ".into());
        assert_eq!(
            missing_message.execute(&ctx).await,
            Err(UseCaseError::MissingFields)
        );

        let mut missing_subscription = usecase(json!({}), false);
        missing_subscription.subscription = None;
        assert_eq!(
            missing_subscription.execute(&ctx).await,
            Err(UseCaseError::MissingFields)
        );

        let mut empty_subscription = usecase(json!({}), false);
        assert_eq!(
            empty_subscription.execute(&ctx).await,
            Err(UseCaseError::InvalidSubscription(
                InvalidSubscriptionError::Unrecognized
            ))
        );

        let mut bad_send_at = usecase(json!({ "url": "https://hooks.example.com" }), false);
        bad_send_at.send_at = Some("amanhã às 10".into());
        assert!(matches!(
            bad_send_at.execute(&ctx).await,
            Err(UseCaseError::InvalidSendAt(_))
        ));
    }
}
