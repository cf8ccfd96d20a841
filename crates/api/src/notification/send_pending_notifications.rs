use crate::error::PlannerError;
use crate::shared::{
    auth::protect_service_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use planner_api_structs::send_pending_notifications::*;
use planner_domain::{DeliveryReport, ScheduledNotification, Subscription};
use planner_infra::{DeliveryError, NotificationConfig, PlannerContext};
use tracing::{error, info, warn};

pub async fn send_pending_notifications_controller(
    http_req: HttpRequest,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    protect_service_route(&http_req, &ctx)?;

    let usecase = SendPendingNotificationsUseCase {
        config: ctx.config.notifications.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reports| HttpResponse::Ok().json(APIResponse::new(reports)))
        .map_err(PlannerError::from)
}

/// One run of the notification worker.
///
/// Claims a batch of due notifications and delivers them one after the
/// other. Delivery failures end up in the returned reports and on the
/// notification rows, they never fail the run itself.
#[derive(Debug)]
pub struct SendPendingNotificationsUseCase {
    pub config: NotificationConfig,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for PlannerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl SendPendingNotificationsUseCase {
    /// The row's own subscription wins over the one registered by the user
    async fn resolve_subscription(
        notification: &ScheduledNotification,
        ctx: &PlannerContext,
    ) -> Option<Subscription> {
        if let Some(subscription) = &notification.subscription {
            return Some(subscription.clone());
        }
        ctx.repos
            .push_subscriptions
            .find_by_user(&notification.user_id)
            .await
            .map(|p| p.subscription)
    }

    /// Settles the notification only while the claim made at `claimed_at`
    /// still holds it
    async fn deliver(
        &self,
        notification: &ScheduledNotification,
        claimed_at: i64,
        ctx: &PlannerContext,
    ) -> DeliveryReport {
        let res = match Self::resolve_subscription(notification, ctx).await {
            Some(subscription) => ctx.notifier.deliver(&subscription, notification).await,
            None => Err(DeliveryError::NoSubscription),
        };

        match res {
            Ok(receipt) => {
                match ctx
                    .repos
                    .notifications
                    .mark_sent(&notification.id, claimed_at)
                    .await
                {
                    Ok(true) => {}
                    Ok(false) => warn!(
                        "Notification {} was sent or rescheduled during delivery",
                        notification.id
                    ),
                    Err(e) => error!(
                        "Delivered notification {} but could not mark it sent: {:?}",
                        notification.id, e
                    ),
                }
                DeliveryReport {
                    id: notification.id.clone(),
                    ok: true,
                    status: receipt.status,
                    error: None,
                }
            }
            Err(e) => {
                let permanent = e.is_permanent();
                warn!(
                    "Delivery of notification {} failed (permanent: {}): {}",
                    notification.id, permanent, e
                );
                if let Err(storage_err) = ctx
                    .repos
                    .notifications
                    .record_failure(
                        &notification.id,
                        claimed_at,
                        &e.to_string(),
                        permanent,
                        self.config.max_attempts,
                    )
                    .await
                {
                    error!(
                        "Unable to record failure of notification {}: {:?}",
                        notification.id, storage_err
                    );
                }
                DeliveryReport {
                    id: notification.id.clone(),
                    ok: false,
                    status: e.status(),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendPendingNotificationsUseCase {
    type Response = Vec<DeliveryReport>;

    type Error = UseCaseError;

    const NAME: &'static str = "SendPendingNotifications";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let claimed = ctx
            .repos
            .notifications
            .claim_due(now, self.config.claim_lease_millis, self.config.batch_size)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if claimed.is_empty() {
            return Ok(Vec::new());
        }
        info!("Delivering {} due notifications", claimed.len());

        let mut reports = Vec::with_capacity(claimed.len());
        for notification in &claimed {
            reports.push(self.deliver(notification, now, ctx).await);
        }
        Ok(reports)
    }
}
