mod delete_push_subscription;
mod get_vapid_public_key;
mod set_push_subscription;

use actix_web::web;
use delete_push_subscription::delete_push_subscription_controller;
use get_vapid_public_key::get_vapid_public_key_controller;
use set_push_subscription::set_push_subscription_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/push-subscription",
        web::put().to(set_push_subscription_controller),
    );
    cfg.route(
        "/push-subscription",
        web::delete().to(delete_push_subscription_controller),
    );
    cfg.route(
        "/push-subscription/vapid-key",
        web::get().to(get_vapid_public_key_controller),
    );
}
