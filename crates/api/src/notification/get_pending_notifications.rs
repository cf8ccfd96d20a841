use crate::error::PlannerError;
use crate::shared::{
    auth::protect_service_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use planner_api_structs::get_pending_notifications::*;
use planner_domain::ScheduledNotification;
use planner_infra::PlannerContext;

pub async fn get_pending_notifications_controller(
    http_req: HttpRequest,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    protect_service_route(&http_req, &ctx)?;

    let usecase = GetPendingNotificationsUseCase {
        limit: ctx.config.notifications.pending_list_limit,
    };

    execute(usecase, &ctx)
        .await
        .map(|pending| HttpResponse::Ok().json(APIResponse::new(pending)))
        .map_err(PlannerError::from)
}

/// Due notifications that are not sent yet, oldest first
#[derive(Debug)]
pub struct GetPendingNotificationsUseCase {
    pub limit: usize,
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
impl UseCase for GetPendingNotificationsUseCase {
    type Response = Vec<ScheduledNotification>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetPendingNotifications";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .notifications
            .find_pending(ctx.sys.get_timestamp_millis(), self.limit)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
