use super::ICompromissoRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::NaiveDate;
use planner_domain::{Compromisso, ID};

pub struct InMemoryCompromissoRepo {
    compromissos: std::sync::Mutex<Vec<Compromisso>>,
}

impl InMemoryCompromissoRepo {
    pub fn new() -> Self {
        Self {
            compromissos: std::sync::Mutex::new(Vec::new()),
        }
    }
}

fn sorted(mut compromissos: Vec<Compromisso>) -> Vec<Compromisso> {
    compromissos.sort_by_key(|c| (c.date, c.start_time));
    compromissos
}

#[async_trait::async_trait]
impl ICompromissoRepo for InMemoryCompromissoRepo {
    async fn insert(&self, compromisso: &Compromisso) -> anyhow::Result<()> {
        insert(compromisso, &self.compromissos);
        Ok(())
    }

    async fn save(&self, compromisso: &Compromisso) -> anyhow::Result<()> {
        save(compromisso, &self.compromissos);
        Ok(())
    }

    async fn find(&self, compromisso_id: &ID) -> Option<Compromisso> {
        find(compromisso_id, &self.compromissos)
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Compromisso>> {
        Ok(sorted(find_by(&self.compromissos, |c| {
            c.user_id == *user_id
        })))
    }

    async fn find_by_user_between(
        &self,
        user_id: &ID,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<Compromisso>> {
        Ok(sorted(find_by(&self.compromissos, |c| {
            c.user_id == *user_id && c.date >= from && c.date <= to
        })))
    }

    async fn delete(&self, compromisso_id: &ID) -> Option<Compromisso> {
        delete(compromisso_id, &self.compromissos)
    }
}
