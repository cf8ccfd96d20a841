mod agenda;
mod calendar;
mod compromisso;
mod notification;
mod push_subscription;
mod status;

pub mod dtos {
    pub use crate::agenda::dtos::*;
    pub use crate::calendar::dtos::*;
    pub use crate::compromisso::dtos::*;
    pub use crate::notification::dtos::*;
    pub use crate::push_subscription::dtos::*;
}

pub use crate::agenda::api::*;
pub use crate::calendar::api::*;
pub use crate::compromisso::api::*;
pub use crate::notification::api::*;
pub use crate::push_subscription::api::*;
pub use crate::status::api::*;
