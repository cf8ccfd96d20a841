use super::IAgendaRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::NaiveDate;
use planner_domain::{Agenda, ID};

pub struct InMemoryAgendaRepo {
    agendas: std::sync::Mutex<Vec<Agenda>>,
}

impl InMemoryAgendaRepo {
    pub fn new() -> Self {
        Self {
            agendas: std::sync::Mutex::new(Vec::new()),
        }
    }
}

fn sorted(mut agendas: Vec<Agenda>) -> Vec<Agenda> {
    agendas.sort_by_key(|a| (a.date, a.start_time));
    agendas
}

#[async_trait::async_trait]
impl IAgendaRepo for InMemoryAgendaRepo {
    async fn insert(&self, agenda: &Agenda) -> anyhow::Result<()> {
        insert(agenda, &self.agendas);
        Ok(())
    }

    async fn save(&self, agenda: &Agenda) -> anyhow::Result<()> {
        save(agenda, &self.agendas);
        Ok(())
    }

    async fn find(&self, agenda_id: &ID) -> Option<Agenda> {
        find(agenda_id, &self.agendas)
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Agenda>> {
        Ok(sorted(find_by(&self.agendas, |a| a.user_id == *user_id)))
    }

    async fn find_by_user_between(
        &self,
        user_id: &ID,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<Agenda>> {
        Ok(sorted(find_by(&self.agendas, |a| {
            a.user_id == *user_id && a.date >= from && a.date <= to
        })))
    }

    async fn delete(&self, agenda_id: &ID) -> Option<Agenda> {
        delete(agenda_id, &self.agendas)
    }
}
