use crate::{
    shared::entity::{Entity, ID},
    subscription::Subscription,
};

/// The delivery target a user registered for their reminders.
/// There is at most one per user, registering again replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct PushSubscription {
    pub user_id: ID,
    pub subscription: Subscription,
    pub created: i64,
    pub updated: i64,
}

impl Entity for PushSubscription {
    fn id(&self) -> &ID {
        &self.user_id
    }
}
