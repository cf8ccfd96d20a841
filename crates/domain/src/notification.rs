use crate::{
    shared::entity::{Entity, ID},
    subscription::Subscription,
};

/// A reminder that should be delivered to a user once `send_at` has passed.
///
/// The worker is the only writer after creation. `sent` flips to `true`
/// at most once and only after a confirmed delivery. Rows that can never
/// be delivered are flagged `failed` and are not picked up again.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledNotification {
    pub id: ID,
    pub user_id: ID,
    /// The `Agenda` or `Compromisso` this reminder was created for
    pub event_id: Option<ID>,
    pub message: String,
    /// Timestamp in millis after which the notification is due
    pub send_at: i64,
    pub sent: bool,
    pub failed: bool,
    /// Explicit delivery target. When `None` the user's registered
    /// `PushSubscription` is used at delivery time
    pub subscription: Option<Subscription>,
    pub attempts: i64,
    pub last_error: Option<String>,
    /// Set while a worker run holds this row
    pub claimed_at: Option<i64>,
    pub created: i64,
}

impl ScheduledNotification {
    pub fn new(user_id: ID, message: String, send_at: i64, created: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            event_id: None,
            message,
            send_at,
            sent: false,
            failed: false,
            subscription: None,
            attempts: 0,
            last_error: None,
            claimed_at: None,
            created,
        }
    }

    /// Whether a worker running at `now` may claim this notification.
    /// Claims older than `lease_millis` are considered abandoned.
    pub fn is_claimable(&self, now: i64, lease_millis: i64) -> bool {
        !self.sent
            && !self.failed
            && self.send_at <= now
            && self
                .claimed_at
                .map(|claimed_at| claimed_at <= now - lease_millis)
                .unwrap_or(true)
    }

    pub fn is_pending(&self, now: i64) -> bool {
        !self.sent && !self.failed && self.send_at <= now
    }

    pub fn mark_sent(&mut self) -> bool {
        if self.sent {
            return false;
        }
        self.sent = true;
        self.claimed_at = None;
        true
    }

    /// Records a failed delivery attempt. The notification gives up when the
    /// error is permanent or when `max_attempts` is reached.
    pub fn record_failure(&mut self, error: String, permanent: bool, max_attempts: i64) {
        self.attempts += 1;
        self.last_error = Some(error);
        self.claimed_at = None;
        if permanent || self.attempts >= max_attempts {
            self.failed = true;
        }
    }
}

impl Entity for ScheduledNotification {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Outcome of one delivery attempt made by the worker
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryReport {
    pub id: ID,
    pub ok: bool,
    /// HTTP status returned by the channel, when there was one
    pub status: Option<u16>,
    pub error: Option<String>,
}
