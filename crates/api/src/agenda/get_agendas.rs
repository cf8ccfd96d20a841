use crate::error::PlannerError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use planner_api_structs::get_agendas::*;
use planner_domain::{Agenda, ID};
use planner_infra::PlannerContext;

pub async fn get_agendas_controller(
    http_req: HttpRequest,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetAgendasUseCase { user_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|agendas| HttpResponse::Ok().json(APIResponse::new(agendas)))
        .map_err(PlannerError::from)
}

#[derive(Debug)]
pub struct GetAgendasUseCase {
    pub user_id: ID,
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
impl UseCase for GetAgendasUseCase {
    type Response = Vec<Agenda>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetAgendas";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .agendas
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
