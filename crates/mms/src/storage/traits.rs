//! Storage trait definitions

use anyhow::Result;

use crate::models::ApnRecord;

/// Failures callers may want to tell apart from plain I/O errors
#[derive(Debug, thiserror::Error)]
pub enum ApnStoreError {
    #[error("APN table not found in database")]
    MissingTable,
    #[error("APN store is read-only")]
    ReadOnly,
}

/// Access to the carrier APN table
pub trait ApnStore: Send + Sync {
    /// Rows of the current carrier, in table order
    ///
    /// When `apn_name` is given only rows with that access point name are
    /// returned.
    fn current_apns(&self, apn_name: Option<&str>) -> Result<Vec<ApnRecord>>;

    /// Append a row
    fn insert_apn(&self, record: ApnRecord) -> Result<()>;

    /// Remove all rows
    fn clear(&self) -> Result<()>;
}
