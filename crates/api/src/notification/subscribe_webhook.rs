use super::create_notification::CreateNotificationUseCase;
use crate::error::PlannerError;
use crate::shared::{auth::protect_service_route, usecase::execute};
use actix_web::{web, HttpRequest, HttpResponse};
use planner_api_structs::subscribe_webhook::*;
use planner_infra::PlannerContext;

/// Same as creating a notification, restricted to webhook subscriptions
pub async fn subscribe_webhook_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    protect_service_route(&http_req, &ctx)?;

    let usecase = CreateNotificationUseCase::new(body.0, true);

    execute(usecase, &ctx)
        .await
        .map(|notification| HttpResponse::Ok().json(APIResponse::new(notification)))
        .map_err(PlannerError::from)
}
