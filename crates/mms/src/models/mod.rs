//! Domain models for conversation rows and MMS settings

mod apn;
mod delivery;
mod header;
mod thread;

pub use apn::{APN_TYPE_ALL, APN_TYPE_MMS, ApnRecord};
pub use delivery::DeliveryStatus;
pub use header::{ConversationHeader, HeaderFlags, HeaderObserver};
pub use thread::{ConversationSummary, ThreadId};
