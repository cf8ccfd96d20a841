use crate::error::PlannerError;
use crate::notification::subscribers::SyncNotificationsOnAgendaDeleted;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use planner_api_structs::delete_agenda::*;
use planner_domain::{Agenda, ID};
use planner_infra::PlannerContext;

pub async fn delete_agenda_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteAgendaUseCase {
        user_id: user.id,
        agenda_id: path_params.into_inner().agenda_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|agenda| HttpResponse::Ok().json(APIResponse::new(agenda)))
        .map_err(PlannerError::from)
}

#[derive(Debug)]
pub struct DeleteAgendaUseCase {
    pub user_id: ID,
    pub agenda_id: ID,
}

#[derive(Debug, PartialEq)]
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
impl UseCase for DeleteAgendaUseCase {
    type Response = Agenda;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteAgenda";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.agendas.find(&self.agenda_id).await {
            Some(agenda) if agenda.user_id == self.user_id => {}
            _ => return Err(UseCaseError::NotFound(self.agenda_id.clone())),
        };
        ctx.repos
            .agendas
            .delete(&self.agenda_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.agenda_id.clone()))
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SyncNotificationsOnAgendaDeleted)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::agenda::CreateAgendaUseCase;
    use planner_domain::User;

    #[actix_web::test]
    async fn deletes_agenda_and_pending_reminders() {
        let ctx = PlannerContext::create_inmemory();
        let user = User::new(ID::default());
        let create = CreateAgendaUseCase {
            user: user.clone(),
            date: "2100-01-01".into(),
            start_time: Some("10:00".into()),
            end_time: None,
            title: "Campanha".into(),
            description: String::new(),
            instagram: String::new(),
            link: String::new(),
            cupom: String::new(),
            anexo: Vec::new(),
        };
        let agenda = execute(create, &ctx).await.unwrap();
        assert_eq!(
            ctx.repos.notifications.find_by_event(&agenda.id).await.unwrap().len(),
            1
        );

        let mut other_user = DeleteAgendaUseCase {
            user_id: ID::default(),
            agenda_id: agenda.id.clone(),
        };
        assert!(other_user.execute(&ctx).await.is_err());

        let usecase = DeleteAgendaUseCase {
            user_id: user.id.clone(),
            agenda_id: agenda.id.clone(),
        };
        let deleted = execute(usecase, &ctx).await.unwrap();
        assert_eq!(deleted.id, agenda.id);
        assert!(ctx.repos.agendas.find(&agenda.id).await.is_none());
        assert!(ctx
            .repos
            .notifications
            .find_by_event(&agenda.id)
            .await
            .unwrap()
            .is_empty());
    }
}
