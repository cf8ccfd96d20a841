mod inmemory;
mod postgres;

use chrono::NaiveDate;
pub use inmemory::InMemoryCompromissoRepo;
use planner_domain::{Compromisso, ID};
pub use postgres::PostgresCompromissoRepo;

#[async_trait::async_trait]
pub trait ICompromissoRepo: Send + Sync {
    async fn insert(&self, compromisso: &Compromisso) -> anyhow::Result<()>;
    async fn save(&self, compromisso: &Compromisso) -> anyhow::Result<()>;
    async fn find(&self, compromisso_id: &ID) -> Option<Compromisso>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Compromisso>>;
    async fn find_by_user_between(
        &self,
        user_id: &ID,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<Compromisso>>;
    async fn delete(&self, compromisso_id: &ID) -> Option<Compromisso>;
}

#[cfg(test)]
mod tests {
    use crate::PlannerContext;
    use chrono::{Duration, NaiveDate, NaiveTime};
    use planner_domain::{Compromisso, ID};

    #[tokio::test]
    async fn crud_and_range_queries() {
        let ctx = PlannerContext::create_inmemory();
        let user_id = ID::default();
        let monday = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        let mut dentist = Compromisso::new(user_id.clone(), monday, 0);
        dentist.title = "Dentista".into();
        dentist.start_time = NaiveTime::from_hms_opt(14, 0, 0);
        let mut gym = Compromisso::new(user_id.clone(), monday + Duration::days(7), 0);
        gym.title = "Academia".into();

        ctx.repos.compromissos.insert(&gym).await.unwrap();
        ctx.repos.compromissos.insert(&dentist).await.unwrap();

        let all = ctx.repos.compromissos.find_by_user(&user_id).await.unwrap();
        assert_eq!(all, vec![dentist.clone(), gym.clone()]);

        let week = ctx
            .repos
            .compromissos
            .find_by_user_between(&user_id, monday, monday + Duration::days(5))
            .await
            .unwrap();
        assert_eq!(week, vec![dentist.clone()]);

        dentist.description = "Levar exames".into();
        ctx.repos.compromissos.save(&dentist).await.unwrap();
        assert_eq!(
            ctx.repos.compromissos.find(&dentist.id).await,
            Some(dentist.clone())
        );

        assert!(ctx.repos.compromissos.delete(&dentist.id).await.is_some());
        assert!(ctx.repos.compromissos.find(&dentist.id).await.is_none());
    }
}
