//! MMS crate - conversation list rows and MMS gateway settings
//!
//! This crate provides the platform-independent pieces of the messaging
//! client's list UI:
//! - Domain models (ConversationHeader, ThreadId, ApnRecord)
//! - Recyclable conversation rows that apply background-resolved sender
//!   names only while they still show the same conversation
//! - A render queue that marshals background work onto the render thread
//! - Contact name resolution
//! - Delivery report rows
//! - APN storage and MMS transaction settings
//!
//! It has no UI toolkit dependencies; rows expose plain snapshots of what
//! they display.

pub mod config;
pub mod contacts;
pub mod models;
pub mod query;
pub mod storage;
pub mod transaction;
pub mod ui;

pub use crate::config::GatewayOverride;
pub use contacts::{ContactNameCache, NameResolver, PooledNameResolver, ResolveCallback};
pub use models::{
    APN_TYPE_ALL, APN_TYPE_MMS, ApnRecord, ConversationHeader, ConversationSummary,
    DeliveryStatus, HeaderFlags, HeaderObserver, ThreadId,
};
pub use query::{find_header, load_headers, unresolved_count};
pub use storage::{ApnStore, ApnStoreError, InMemoryApnStore, SqliteApnStore, load_apns_json};
pub use transaction::{NO_PROXY_PORT, TransactionSettings, is_valid_apn_type};
pub use ui::{
    ConversationHeaderView, DeliveryReportListItem, DeliveryReportRow, HeaderRow, RenderLoop,
    RenderQueue, RenderQueueClosed, RowStrings, StatusIcon, StyledText, format_date, format_from,
    render_queue,
};
