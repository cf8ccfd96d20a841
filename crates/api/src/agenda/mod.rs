mod create_agenda;
mod delete_agenda;
mod get_agenda;
mod get_agendas;
mod update_agenda;

use actix_web::web;
use create_agenda::create_agenda_controller;
use delete_agenda::delete_agenda_controller;
use get_agenda::get_agenda_controller;
use get_agendas::get_agendas_controller;
use update_agenda::update_agenda_controller;

pub use create_agenda::CreateAgendaUseCase;
pub use delete_agenda::DeleteAgendaUseCase;
pub use get_agendas::GetAgendasUseCase;
pub use update_agenda::UpdateAgendaUseCase;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/agendas", web::post().to(create_agenda_controller));
    cfg.route("/agendas", web::get().to(get_agendas_controller));
    cfg.route("/agendas/{agenda_id}", web::get().to(get_agenda_controller));
    cfg.route(
        "/agendas/{agenda_id}",
        web::put().to(update_agenda_controller),
    );
    cfg.route(
        "/agendas/{agenda_id}",
        web::delete().to(delete_agenda_controller),
    );
}
