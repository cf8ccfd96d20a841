use crate::error::PlannerError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use planner_api_structs::get_agenda::*;
use planner_domain::{Agenda, ID};
use planner_infra::PlannerContext;

pub async fn get_agenda_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetAgendaUseCase {
        user_id: user.id,
        agenda_id: path_params.into_inner().agenda_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|agenda| HttpResponse::Ok().json(APIResponse::new(agenda)))
        .map_err(PlannerError::from)
}

#[derive(Debug)]
pub struct GetAgendaUseCase {
    pub user_id: ID,
    pub agenda_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for PlannerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(agenda_id) => Self::NotFound(format!(
                "The agenda with id: {}, was not found.",
                agenda_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetAgendaUseCase {
    type Response = Agenda;

    type Error = UseCaseError;

    const NAME: &'static str = "GetAgenda";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.agendas.find(&self.agenda_id).await {
            Some(agenda) if agenda.user_id == self.user_id => Ok(agenda),
            _ => Err(UseCaseError::NotFound(self.agenda_id.clone())),
        }
    }
}
