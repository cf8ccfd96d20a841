use crate::shared::usecase::UseCase;
use planner_domain::{CalendarEntry, EntryReminder, ScheduledNotification};
use planner_infra::PlannerContext;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryOperation {
    Created,
    Updated,
    Deleted,
}

/// Keeps the `ScheduledNotification`s of an `Agenda` or `Compromisso` in sync
/// with its start time
#[derive(Debug)]
pub struct SyncEntryNotificationsUseCase<'a> {
    pub entry: &'a dyn CalendarEntry,
    pub operation: EntryOperation,
}

#[derive(Debug)]
pub enum UseCaseError {
    /// The start time of the entry does not exist in the configured timezone
    UnschedulableStart,
    StorageError,
}

impl<'a> SyncEntryNotificationsUseCase<'a> {
    fn reminder(&self, ctx: &PlannerContext) -> Option<EntryReminder> {
        EntryReminder::for_entry(
            self.entry,
            ctx.config.notifications.lead_minutes,
            &ctx.config.timezone,
        )
    }

    async fn create(&self, ctx: &PlannerContext) -> Result<(), UseCaseError> {
        let reminder = self
            .reminder(ctx)
            .ok_or(UseCaseError::UnschedulableStart)?;
        let mut notification = ScheduledNotification::new(
            self.entry.user_id().clone(),
            reminder.message,
            reminder.send_at,
            ctx.sys.get_timestamp_millis(),
        );
        notification.event_id = Some(self.entry.id().clone());

        ctx.repos
            .notifications
            .insert(&notification)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }

    async fn update(&self, ctx: &PlannerContext) -> Result<(), UseCaseError> {
        let reminder = match self.reminder(ctx) {
            Some(reminder) => reminder,
            None => {
                self.delete(ctx).await?;
                return Err(UseCaseError::UnschedulableStart);
            }
        };

        let rescheduled = ctx
            .repos
            .notifications
            .reschedule_unsent_by_event(self.entry.id(), reminder.send_at, &reminder.message)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        // The previous reminder was already delivered, only remind again
        // when the new time is still ahead of us
        if rescheduled == 0 && reminder.send_at > ctx.sys.get_timestamp_millis() {
            self.create(ctx).await?;
        }
        Ok(())
    }

    async fn delete(&self, ctx: &PlannerContext) -> Result<(), UseCaseError> {
        let res = ctx
            .repos
            .notifications
            .delete_unsent_by_event(self.entry.id())
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if res.deleted_count > 0 {
            info!(
                "Cancelled {} pending notifications of {} {}",
                res.deleted_count,
                self.entry.kind().as_str(),
                self.entry.id()
            );
        }
        Ok(())
    }
}

#[async_trait::async_trait(?Send)]
impl<'a> UseCase for SyncEntryNotificationsUseCase<'a> {
    type Response = ();

    type Error = UseCaseError;

    const NAME: &'static str = "SyncEntryNotifications";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let res = match self.operation {
            EntryOperation::Created => self.create(ctx).await,
            EntryOperation::Updated => self.update(ctx).await,
            EntryOperation::Deleted => self.delete(ctx).await,
        };
        if let Err(UseCaseError::UnschedulableStart) = res {
            warn!(
                "No reminder scheduled for {} {}: its start time does not exist in {}",
                self.entry.kind().as_str(),
                self.entry.id(),
                ctx.config.timezone
            );
        }
        res
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use planner_domain::{Agenda, ID};
    use planner_infra::StaticTimeSys;
    use std::sync::Arc;

    #[actix_web::test]
    async fn cancels_reminder_when_start_time_does_not_exist() {
        let mut ctx = PlannerContext::create_inmemory();
        ctx.config.timezone = chrono_tz::Europe::Oslo;
        ctx.sys = Arc::new(StaticTimeSys {
            timestamp_millis: 0,
        });
        let mut agenda = Agenda::new(
            ID::default(),
            NaiveDate::from_ymd_opt(2026, 3, 29).unwrap(),
            0,
        );
        agenda.start_time = NaiveTime::from_hms_opt(10, 0, 0);

        let mut created = SyncEntryNotificationsUseCase {
            entry: &agenda,
            operation: EntryOperation::Created,
        };
        assert!(created.execute(&ctx).await.is_ok());

        // Moved into the hour skipped by the DST transition
        agenda.start_time = NaiveTime::from_hms_opt(2, 30, 0);
        let mut updated = SyncEntryNotificationsUseCase {
            entry: &agenda,
            operation: EntryOperation::Updated,
        };
        assert!(matches!(
            updated.execute(&ctx).await,
            Err(UseCaseError::UnschedulableStart)
        ));
        assert!(ctx
            .repos
            .notifications
            .find_by_event(&agenda.id)
            .await
            .unwrap()
            .is_empty());
    }
}
