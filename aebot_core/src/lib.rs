pub mod config;
pub mod dispatch;
pub mod event;
pub mod message;

mod format;
pub use format::{FormatTime, LocalTime, Uptime};

mod identity;
pub use identity::Identity;

pub mod prelude {
    pub use std::sync::Arc;

    pub use crate::dispatch::{Context, Dispatcher, Handler, SharedHandler};
    pub use crate::event::{Category, Event};
    pub use crate::message::Outbound;
    pub use crate::{FormatTime, Identity, LocalTime, Uptime};
}
