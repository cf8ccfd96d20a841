use crate::error::PlannerError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use planner_api_structs::get_compromissos::*;
use planner_domain::{Compromisso, ID};
use planner_infra::PlannerContext;

pub async fn get_compromissos_controller(
    http_req: HttpRequest,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetCompromissosUseCase { user_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|compromissos| HttpResponse::Ok().json(APIResponse::new(compromissos)))
        .map_err(PlannerError::from)
}

#[derive(Debug)]
pub struct GetCompromissosUseCase {
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
impl UseCase for GetCompromissosUseCase {
    type Response = Vec<Compromisso>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetCompromissos";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .compromissos
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
