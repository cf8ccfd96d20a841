mod inmemory;
mod postgres;

use chrono::NaiveDate;
pub use inmemory::InMemoryAgendaRepo;
use planner_domain::{Agenda, ID};
pub use postgres::PostgresAgendaRepo;

#[async_trait::async_trait]
pub trait IAgendaRepo: Send + Sync {
    async fn insert(&self, agenda: &Agenda) -> anyhow::Result<()>;
    async fn save(&self, agenda: &Agenda) -> anyhow::Result<()>;
    async fn find(&self, agenda_id: &ID) -> Option<Agenda>;
    /// All `Agenda`s of the user, sorted by date and start time
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Agenda>>;
    /// `Agenda`s of the user dated between `from` and `to`, both inclusive
    async fn find_by_user_between(
        &self,
        user_id: &ID,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<Agenda>>;
    async fn delete(&self, agenda_id: &ID) -> Option<Agenda>;
}

#[cfg(test)]
mod tests {
    use crate::PlannerContext;
    use chrono::{Duration, NaiveDate, NaiveTime};
    use planner_domain::{Agenda, ID};

    fn agenda(user_id: &ID, date: NaiveDate, start: Option<NaiveTime>) -> Agenda {
        let mut agenda = Agenda::new(user_id.clone(), date, 0);
        agenda.start_time = start;
        agenda.title = "Publi".into();
        agenda.anexo = vec!["anexos/briefing.pdf".into()];
        agenda
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[tokio::test]
    async fn crud() {
        let ctx = PlannerContext::create_inmemory();
        let user_id = ID::default();
        let mut a = agenda(&user_id, date(), NaiveTime::from_hms_opt(10, 0, 0));

        assert!(ctx.repos.agendas.insert(&a).await.is_ok());
        assert_eq!(ctx.repos.agendas.find(&a.id).await, Some(a.clone()));

        a.cupom = "PROMO10".into();
        assert!(ctx.repos.agendas.save(&a).await.is_ok());
        assert_eq!(
            ctx.repos.agendas.find(&a.id).await.unwrap().cupom,
            "PROMO10"
        );

        assert_eq!(ctx.repos.agendas.delete(&a.id).await, Some(a.clone()));
        assert!(ctx.repos.agendas.find(&a.id).await.is_none());
        assert!(ctx.repos.agendas.delete(&a.id).await.is_none());
    }

    #[tokio::test]
    async fn finds_by_user_sorted_by_date() {
        let ctx = PlannerContext::create_inmemory();
        let user_id = ID::default();
        let later = agenda(&user_id, date() + Duration::days(2), None);
        let afternoon = agenda(&user_id, date(), NaiveTime::from_hms_opt(15, 0, 0));
        let morning = agenda(&user_id, date(), NaiveTime::from_hms_opt(8, 0, 0));
        let other_user = agenda(&ID::default(), date(), None);
        for a in &[&later, &afternoon, &morning, &other_user] {
            ctx.repos.agendas.insert(a).await.unwrap();
        }

        let agendas = ctx.repos.agendas.find_by_user(&user_id).await.unwrap();
        let ids = agendas.into_iter().map(|a| a.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![morning.id.clone(), afternoon.id.clone(), later.id]);

        let agendas = ctx
            .repos
            .agendas
            .find_by_user_between(&user_id, date(), date() + Duration::days(1))
            .await
            .unwrap();
        assert_eq!(agendas.len(), 2);
    }
}
