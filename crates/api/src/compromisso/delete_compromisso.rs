use crate::error::PlannerError;
use crate::notification::subscribers::SyncNotificationsOnCompromissoDeleted;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use planner_api_structs::delete_compromisso::*;
use planner_domain::{Compromisso, ID};
use planner_infra::PlannerContext;

pub async fn delete_compromisso_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteCompromissoUseCase {
        user_id: user.id,
        compromisso_id: path_params.into_inner().compromisso_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|compromisso| HttpResponse::Ok().json(APIResponse::new(compromisso)))
        .map_err(PlannerError::from)
}

#[derive(Debug)]
pub struct DeleteCompromissoUseCase {
    pub user_id: ID,
    pub compromisso_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for PlannerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(compromisso_id) => Self::NotFound(format!(
                "The compromisso with id: {}, was not found.",
                compromisso_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteCompromissoUseCase {
    type Response = Compromisso;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteCompromisso";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.compromissos.find(&self.compromisso_id).await {
            Some(compromisso) if compromisso.user_id == self.user_id => {}
            _ => return Err(UseCaseError::NotFound(self.compromisso_id.clone())),
        };
        ctx.repos
            .compromissos
            .delete(&self.compromisso_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.compromisso_id.clone()))
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SyncNotificationsOnCompromissoDeleted)]
    }
}
