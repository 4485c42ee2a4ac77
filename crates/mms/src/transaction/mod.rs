//! MMS transaction plumbing

mod settings;

pub use settings::{NO_PROXY_PORT, TransactionSettings, is_valid_apn_type};
