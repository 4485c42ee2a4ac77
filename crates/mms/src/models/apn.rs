//! APN (access point) configuration rows

use serde::{Deserialize, Serialize};

/// APN type carried by access points usable for MMS
pub const APN_TYPE_MMS: &str = "mms";

/// APN type meaning "usable for every kind of traffic"
pub const APN_TYPE_ALL: &str = "*";

/// One row of the carrier APN table
///
/// Text columns are nullable in the carrier database, so they are optional
/// here too. The port stays a string because carriers ship all sorts of
/// junk in it; it is parsed leniently when settings are resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApnRecord {
    /// Human readable carrier entry name
    #[serde(default)]
    pub name: String,
    /// Access point name the row is selected by
    #[serde(default)]
    pub apn: String,
    /// Comma separated APN types, e.g. `"default,mms"`; empty means all
    #[serde(default, rename = "type")]
    pub apn_type: Option<String>,
    /// MMS service center (gateway) URL
    #[serde(default)]
    pub mmsc: Option<String>,
    #[serde(default)]
    pub mms_proxy: Option<String>,
    #[serde(default)]
    pub mms_port: Option<String>,
    /// Whether the row belongs to the currently active carrier
    #[serde(default = "default_current")]
    pub current: bool,
}

fn default_current() -> bool {
    true
}

impl ApnRecord {
    /// Create a current APN row for `apn` with the given type list and MMSC
    pub fn new(apn: impl Into<String>, apn_type: impl Into<String>, mmsc: impl Into<String>) -> Self {
        let apn = apn.into();
        Self {
            name: apn.clone(),
            apn,
            apn_type: Some(apn_type.into()),
            mmsc: Some(mmsc.into()),
            mms_proxy: None,
            mms_port: None,
            current: true,
        }
    }

    /// Set the MMS proxy address and port
    pub fn with_proxy(mut self, proxy: impl Into<String>, port: impl Into<String>) -> Self {
        self.mms_proxy = Some(proxy.into());
        self.mms_port = Some(port.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_carrier_json() {
        let json = r#"{
            "name": "Example MMS",
            "apn": "mms.example",
            "type": "mms",
            "mmsc": "http://mms.example/servlets/mms",
            "mms_proxy": "10.0.0.1",
            "mms_port": "8080"
        }"#;

        let record: ApnRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.apn_type.as_deref(), Some("mms"));
        assert_eq!(record.mms_port.as_deref(), Some("8080"));
        assert!(record.current);
    }

    #[test]
    fn test_missing_columns_are_none() {
        let record: ApnRecord = serde_json::from_str(r#"{ "apn": "internet" }"#).unwrap();
        assert_eq!(record.apn, "internet");
        assert!(record.apn_type.is_none());
        assert!(record.mmsc.is_none());
    }
}
