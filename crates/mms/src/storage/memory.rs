//! In-memory APN store

use anyhow::Result;
use log::debug;
use std::path::Path;
use std::sync::RwLock;

use super::ApnStore;
use crate::models::ApnRecord;

/// APN rows held in a vector, in insertion order
#[derive(Debug, Default)]
pub struct InMemoryApnStore {
    records: RwLock<Vec<ApnRecord>>,
}

impl InMemoryApnStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<ApnRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

impl ApnStore for InMemoryApnStore {
    fn current_apns(&self, apn_name: Option<&str>) -> Result<Vec<ApnRecord>> {
        let records = self.records.read().unwrap_or_else(|p| p.into_inner());
        Ok(records
            .iter()
            .filter(|record| record.current)
            .filter(|record| apn_name.is_none_or(|name| record.apn == name))
            .cloned()
            .collect())
    }

    fn insert_apn(&self, record: ApnRecord) -> Result<()> {
        let mut records = self.records.write().unwrap_or_else(|p| p.into_inner());
        records.push(record);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.records
            .write()
            .unwrap_or_else(|p| p.into_inner())
            .clear();
        Ok(())
    }
}

/// Load an APN table from a JSON array of rows
pub fn load_apns_json(path: &Path) -> Result<InMemoryApnStore> {
    let records: Vec<ApnRecord> = ::config::load_json_file(path)?;
    debug!("Loaded {} APN rows from {}", records.len(), path.display());
    Ok(InMemoryApnStore::from_records(records))
}
