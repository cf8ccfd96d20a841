use actix_web::{web, HttpResponse};
use planner_api_structs::get_service_health::*;
use planner_infra::PlannerContext;

async fn status(ctx: web::Data<PlannerContext>) -> HttpResponse {
    HttpResponse::Ok().json(APIResponse {
        message: "Yo! We are up!\r\n".into(),
        web_push_enabled: ctx.config.vapid.is_some(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status));
}
