//! Gateway settings an MMS transaction is sent through
//!
//! Settings normally come from the carrier APN table: the first current row
//! whose type list covers MMS supplies the MMSC URL and proxy. They can also
//! be given explicitly (see [`crate::config::GatewayOverride`]).

use log::{debug, error};

use crate::models::{APN_TYPE_ALL, APN_TYPE_MMS, ApnRecord};
use crate::storage::ApnStore;

/// Proxy port value meaning "not set"
pub const NO_PROXY_PORT: i32 = -1;

/// MMSC URL and proxy for MMS transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSettings {
    mmsc_url: Option<String>,
    proxy_address: Option<String>,
    proxy_port: i32,
}

impl Default for TransactionSettings {
    fn default() -> Self {
        Self {
            mmsc_url: None,
            proxy_address: None,
            proxy_port: NO_PROXY_PORT,
        }
    }
}

impl TransactionSettings {
    /// Settings with explicit values, bypassing the APN table
    pub fn new(
        mmsc_url: impl Into<String>,
        proxy_address: Option<String>,
        proxy_port: i32,
    ) -> Self {
        Self {
            mmsc_url: Some(mmsc_url.into()),
            proxy_address,
            proxy_port,
        }
    }

    /// Resolve settings from the current APNs in `store`
    ///
    /// A store that can't be read yields default (empty) settings.
    pub fn load(store: &dyn ApnStore, apn_name: Option<&str>) -> Self {
        match store.current_apns(apn_name) {
            Ok(records) => Self::from_apns(&records, apn_name),
            Err(e) => {
                error!("APN lookup failed: {:#}", e);
                Self::default()
            }
        }
    }

    /// Resolve settings from APN rows in table order
    ///
    /// Scanning stops at the first MMS-capable row that provides an MMSC URL.
    /// A proxy port that doesn't parse is logged and left unset.
    pub fn from_apns(records: &[ApnRecord], apn_name: Option<&str>) -> Self {
        let mut settings = Self::default();

        let candidates = records
            .iter()
            .filter(|record| apn_name.is_none_or(|name| record.apn == name));

        for record in candidates {
            if settings.mmsc_url.as_deref().is_some_and(|url| !url.is_empty()) {
                break;
            }
            if !is_valid_apn_type(record.apn_type.as_deref(), APN_TYPE_MMS) {
                continue;
            }

            settings.mmsc_url = record.mmsc.clone();
            settings.proxy_address = record.mms_proxy.clone();
            settings.proxy_port = NO_PROXY_PORT;

            if settings.is_proxy_set() {
                let port = record.mms_port.as_deref().unwrap_or_default();
                match port.trim().parse::<i32>() {
                    Ok(port) => settings.proxy_port = port,
                    Err(e) => error!("Bad port number format: {:?}: {}", port, e),
                }
            }
        }

        debug!(
            "Resolved MMS settings: mmsc={:?} proxy={:?} port={}",
            settings.mmsc_url, settings.proxy_address, settings.proxy_port
        );
        settings
    }

    pub fn mmsc_url(&self) -> Option<&str> {
        self.mmsc_url.as_deref()
    }

    pub fn proxy_address(&self) -> Option<&str> {
        self.proxy_address.as_deref()
    }

    /// Proxy port, [`NO_PROXY_PORT`] when unset
    pub fn proxy_port(&self) -> i32 {
        self.proxy_port
    }

    /// Whether a non-blank proxy address is configured
    pub fn is_proxy_set(&self) -> bool {
        self.proxy_address
            .as_deref()
            .is_some_and(|address| !address.trim().is_empty())
    }
}

/// Whether an APN's comma separated `types` cover `request_type`
///
/// Missing or empty types count as the wildcard.
pub fn is_valid_apn_type(types: Option<&str>, request_type: &str) -> bool {
    let types = match types {
        Some(types) if !types.is_empty() => types,
        _ => return true,
    };

    types
        .split(',')
        .any(|t| t == request_type || t == APN_TYPE_ALL)
}
