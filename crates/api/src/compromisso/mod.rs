mod create_compromisso;
mod delete_compromisso;
mod get_compromisso;
mod get_compromissos;
mod update_compromisso;

use actix_web::web;
use create_compromisso::create_compromisso_controller;
use delete_compromisso::delete_compromisso_controller;
use get_compromisso::get_compromisso_controller;
use get_compromissos::get_compromissos_controller;
use update_compromisso::update_compromisso_controller;

pub use create_compromisso::CreateCompromissoUseCase;
pub use delete_compromisso::DeleteCompromissoUseCase;
pub use update_compromisso::UpdateCompromissoUseCase;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/compromissos", web::post().to(create_compromisso_controller));
    cfg.route("/compromissos", web::get().to(get_compromissos_controller));
    cfg.route(
        "/compromissos/{compromisso_id}",
        web::get().to(get_compromisso_controller),
    );
    cfg.route(
        "/compromissos/{compromisso_id}",
        web::put().to(update_compromisso_controller),
    );
    cfg.route(
        "/compromissos/{compromisso_id}",
        web::delete().to(delete_compromisso_controller),
    );
}
