use super::sync_entry_notifications::{EntryOperation, SyncEntryNotificationsUseCase};
use crate::agenda::{CreateAgendaUseCase, DeleteAgendaUseCase, UpdateAgendaUseCase};
use crate::compromisso::{
    CreateCompromissoUseCase, DeleteCompromissoUseCase, UpdateCompromissoUseCase,
};
use crate::shared::usecase::{execute, Subscriber};
use planner_domain::{Agenda, CalendarEntry, Compromisso};
use planner_infra::PlannerContext;

async fn sync_entry(entry: &dyn CalendarEntry, operation: EntryOperation, ctx: &PlannerContext) {
    let usecase = SyncEntryNotificationsUseCase { entry, operation };

    // Sideeffect, ignore result
    let _ = execute(usecase, ctx).await;
}

pub struct SyncNotificationsOnAgendaCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateAgendaUseCase> for SyncNotificationsOnAgendaCreated {
    async fn notify(&self, e: &Agenda, ctx: &PlannerContext) {
        sync_entry(e, EntryOperation::Created, ctx).await;
    }
}

pub struct SyncNotificationsOnAgendaUpdated;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateAgendaUseCase> for SyncNotificationsOnAgendaUpdated {
    async fn notify(&self, e: &Agenda, ctx: &PlannerContext) {
        sync_entry(e, EntryOperation::Updated, ctx).await;
    }
}

pub struct SyncNotificationsOnAgendaDeleted;

#[async_trait::async_trait(?Send)]
impl Subscriber<DeleteAgendaUseCase> for SyncNotificationsOnAgendaDeleted {
    async fn notify(&self, e: &Agenda, ctx: &PlannerContext) {
        sync_entry(e, EntryOperation::Deleted, ctx).await;
    }
}

pub struct SyncNotificationsOnCompromissoCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateCompromissoUseCase> for SyncNotificationsOnCompromissoCreated {
    async fn notify(&self, e: &Compromisso, ctx: &PlannerContext) {
        sync_entry(e, EntryOperation::Created, ctx).await;
    }
}

pub struct SyncNotificationsOnCompromissoUpdated;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateCompromissoUseCase> for SyncNotificationsOnCompromissoUpdated {
    async fn notify(&self, e: &Compromisso, ctx: &PlannerContext) {
        sync_entry(e, EntryOperation::Updated, ctx).await;
    }
}

pub struct SyncNotificationsOnCompromissoDeleted;

#[async_trait::async_trait(?Send)]
impl Subscriber<DeleteCompromissoUseCase> for SyncNotificationsOnCompromissoDeleted {
    async fn notify(&self, e: &Compromisso, ctx: &PlannerContext) {
        sync_entry(e, EntryOperation::Deleted, ctx).await;
    }
}
