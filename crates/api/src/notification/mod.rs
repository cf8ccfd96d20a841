mod create_notification;
mod get_my_notifications;
mod get_pending_notifications;
mod send_pending_notifications;
mod subscribe_webhook;
pub mod subscribers;
mod sync_entry_notifications;

use actix_web::web;
use create_notification::create_notification_controller;
use get_my_notifications::get_my_notifications_controller;
use get_pending_notifications::get_pending_notifications_controller;
use send_pending_notifications::send_pending_notifications_controller;
use subscribe_webhook::subscribe_webhook_controller;

pub use send_pending_notifications::SendPendingNotificationsUseCase;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/notifications", web::get().to(get_my_notifications_controller));
    cfg.route(
        "/notifications/create",
        web::post().to(create_notification_controller),
    );
    cfg.route(
        "/notifications/subscribe",
        web::post().to(subscribe_webhook_controller),
    );
    cfg.route(
        "/notifications/pending",
        web::get().to(get_pending_notifications_controller),
    );
    cfg.route(
        "/notifications/send-pending",
        web::post().to(send_pending_notifications_controller),
    );
}
