use crate::error::PlannerError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use planner_api_structs::delete_push_subscription::*;
use planner_domain::ID;
use planner_infra::PlannerContext;

pub async fn delete_push_subscription_controller(
    http_req: HttpRequest,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeletePushSubscriptionUseCase { user_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|deleted| HttpResponse::Ok().json(APIResponse { deleted }))
        .map_err(PlannerError::from)
}

#[derive(Debug)]
pub struct DeletePushSubscriptionUseCase {
    pub user_id: ID,
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

#[async_trait::async_trait(?Send)]
impl UseCase for DeletePushSubscriptionUseCase {
    /// Whether there was a subscription to delete
    type Response = bool;

    type Error = UseCaseError;

    const NAME: &'static str = "DeletePushSubscription";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .push_subscriptions
            .delete_by_user(&self.user_id)
            .await
            .map(|res| res.deleted_count > 0)
            .map_err(|_| UseCaseError::StorageError)
    }
}
