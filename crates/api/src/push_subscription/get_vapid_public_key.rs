use crate::error::PlannerError;
use crate::shared::auth::protect_route;
use actix_web::{web, HttpRequest, HttpResponse};
use planner_api_structs::get_vapid_public_key::*;
use planner_infra::PlannerContext;

/// The application server key browsers need to register for Web Push
pub async fn get_vapid_public_key_controller(
    http_req: HttpRequest,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    protect_route(&http_req, &ctx).await?;

    match &ctx.config.vapid {
        Some(vapid) => Ok(HttpResponse::Ok().json(APIResponse {
            public_key: vapid.public_key.clone(),
        })),
        None => Err(PlannerError::NotFound(
            "Web Push is not configured on this server".into(),
        )),
    }
}
