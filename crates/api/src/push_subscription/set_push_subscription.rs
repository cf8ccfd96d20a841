use crate::error::PlannerError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use planner_api_structs::set_push_subscription::*;
use planner_domain::{InvalidSubscriptionError, PushSubscription, Subscription, ID};
use planner_infra::PlannerContext;
use serde_json::Value;
use std::convert::TryFrom;

pub async fn set_push_subscription_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = SetPushSubscriptionUseCase {
        user_id: user.id,
        subscription: body.0.subscription,
    };

    execute(usecase, &ctx)
        .await
        .map(|subscription| HttpResponse::Ok().json(APIResponse::new(subscription)))
        .map_err(PlannerError::from)
}

/// Registers the delivery target of the user, replacing any previous one
#[derive(Debug)]
pub struct SetPushSubscriptionUseCase {
    pub user_id: ID,
    pub subscription: Value,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidSubscription(InvalidSubscriptionError),
    StorageError,
}

impl From<UseCaseError> for PlannerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidSubscription(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetPushSubscriptionUseCase {
    type Response = PushSubscription;

    type Error = UseCaseError;

    const NAME: &'static str = "SetPushSubscription";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let subscription = Subscription::try_from(self.subscription.take())
            .map_err(UseCaseError::InvalidSubscription)?;

        let now = ctx.sys.get_timestamp_millis();
        let created = ctx
            .repos
            .push_subscriptions
            .find_by_user(&self.user_id)
            .await
            .map(|existing| existing.created)
            .unwrap_or(now);

        let push_subscription = PushSubscription {
            user_id: self.user_id.clone(),
            subscription,
            created,
            updated: now,
        };
        ctx.repos
            .push_subscriptions
            .upsert(&push_subscription)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(push_subscription)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[actix_web::test]
    async fn replaces_previous_subscription() {
        let ctx = PlannerContext::create_inmemory();
        let user_id = ID::default();

        let usecase = SetPushSubscriptionUseCase {
            user_id: user_id.clone(),
            subscription: json!({
                "endpoint": "https://push.example.com/abc",
                "keys": { "p256dh": "BPk", "auth": "xyz" }
            }),
        };
        let first = execute(usecase, &ctx).await.unwrap();
        assert_eq!(first.subscription.channel(), "web_push");

        let usecase = SetPushSubscriptionUseCase {
            user_id: user_id.clone(),
            subscription: json!({ "url": "https://hooks.example.com" }),
        };
        execute(usecase, &ctx).await.unwrap();

        let stored = ctx
            .repos
            .push_subscriptions
            .find_by_user(&user_id)
            .await
            .unwrap();
        assert!(stored.subscription.is_webhook());
        assert_eq!(stored.created, first.created);
    }

    #[actix_web::test]
    async fn rejects_unknown_shapes() {
        let ctx = PlannerContext::create_inmemory();
        let usecase = SetPushSubscriptionUseCase {
            user_id: ID::default(),
            subscription: json!({ "foo": "bar" }),
        };
        assert_eq!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::InvalidSubscription(
                InvalidSubscriptionError::Unrecognized
            ))
        );
    }
}
