mod agenda;
mod compromisso;
mod date;
mod entry;
pub mod grid;
mod notification;
mod push_subscription;
mod reminder;
mod shared;
mod subscription;
mod user;

pub use agenda::Agenda;
pub use compromisso::Compromisso;
pub use date::{
    format_date, format_time, format_timestamp, local_date, parse_date, parse_optional_time,
    parse_time, InvalidDateError,
};
pub use entry::{CalendarEntry, EntryKind};
pub use notification::{DeliveryReport, ScheduledNotification};
pub use push_subscription::PushSubscription;
pub use reminder::{compute_send_at, default_start_time, reminder_message, EntryReminder};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use subscription::{
    FcmSubscription, InvalidSubscriptionError, Subscription, WebPushKeys, WebPushSubscription,
    WebhookSubscription,
};
pub use user::User;

pub use chrono_tz::Tz;
