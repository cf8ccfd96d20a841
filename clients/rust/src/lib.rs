mod agenda;
mod base;
mod calendar;
mod compromisso;
mod notification;
mod push_subscription;
mod status;

use agenda::AgendaClient;
pub use agenda::{CreateAgendaInput, UpdateAgendaInput};
pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use calendar::CalendarClient;
use compromisso::CompromissoClient;
pub use compromisso::{CreateCompromissoInput, UpdateCompromissoInput};
use notification::NotificationClient;
pub use notification::ScheduleNotificationInput;
pub use planner_api_structs::dtos::*;
pub use planner_domain::{EntryKind, Subscription, ID};
use push_subscription::PushSubscriptionClient;
use status::StatusClient;
use std::sync::Arc;

// Domain
pub use planner_api_structs::dtos::AgendaDTO as Agenda;
pub use planner_api_structs::dtos::CompromissoDTO as Compromisso;
pub use planner_api_structs::dtos::DeliveryReportDTO as DeliveryReport;
pub use planner_api_structs::dtos::ScheduledNotificationDTO as ScheduledNotification;

/// Planner Server SDK
///
/// The SDK contains methods for interacting with the Planner server API.
/// User routes need a bearer token, the notification service routes need
/// the service role key.
#[derive(Clone)]
pub struct PlannerSDK {
    pub agenda: AgendaClient,
    pub calendar: CalendarClient,
    pub compromisso: CompromissoClient,
    pub notification: NotificationClient,
    pub push_subscription: PushSubscriptionClient,
    pub status: StatusClient,
}

impl PlannerSDK {
    /// Client acting on behalf of the user owning `user_token`
    pub fn new<T: Into<String>>(address: String, user_token: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_user_token(user_token.into());
        Self::from_base(base)
    }

    /// Client for the service routes
    pub fn service<T: Into<String>>(address: String, service_role_key: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_service_role_key(service_role_key.into());
        Self::from_base(base)
    }

    fn from_base(base: BaseClient) -> Self {
        let base = Arc::new(base);
        let agenda = AgendaClient::new(base.clone());
        let calendar = CalendarClient::new(base.clone());
        let compromisso = CompromissoClient::new(base.clone());
        let notification = NotificationClient::new(base.clone());
        let push_subscription = PushSubscriptionClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            agenda,
            calendar,
            compromisso,
            notification,
            push_subscription,
            status,
        }
    }
}
