mod get_day_view;
mod get_week_view;

use actix_web::web;
use get_day_view::get_day_view_controller;
use get_week_view::get_week_view_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/calendar/week", web::get().to(get_week_view_controller));
    cfg.route("/calendar/day", web::get().to(get_day_view_controller));
}
