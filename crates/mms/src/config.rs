//! Gateway override configuration
//!
//! Lets a user or test rig pin the MMSC instead of taking it from the
//! carrier APN table. Sources, in order of priority:
//! 1. JSON file (`~/.config/courier/mms-gateway.json`)
//! 2. Environment variables (`COURIER_MMSC_URL`, `COURIER_MMS_PROXY`, `COURIER_MMS_PORT`)

use anyhow::Result;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::transaction::{NO_PROXY_PORT, TransactionSettings};

/// Override filename in the Courier config directory
const GATEWAY_FILE: &str = "mms-gateway.json";

const ENV_MMSC_URL: &str = "COURIER_MMSC_URL";
const ENV_PROXY: &str = "COURIER_MMS_PROXY";
const ENV_PORT: &str = "COURIER_MMS_PORT";

/// Explicit MMSC and proxy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayOverride {
    pub mmsc_url: String,
    #[serde(default)]
    pub proxy_address: Option<String>,
    #[serde(default)]
    pub proxy_port: Option<i32>,
}

impl GatewayOverride {
    /// Load the override from the config file, then the environment
    ///
    /// `Ok(None)` means no override is configured. A config file that
    /// exists but doesn't parse is an error.
    pub fn load() -> Result<Option<Self>> {
        if let Some(from_file) = ::config::load_optional_json::<Self>(GATEWAY_FILE)? {
            return Ok(Some(from_file));
        }
        Ok(Self::from_env())
    }

    /// Load the override from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        ::config::load_json_file(path)
    }

    /// Load the override from environment variables
    pub fn from_env() -> Option<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let mmsc_url = var(ENV_MMSC_URL).filter(|url| !url.trim().is_empty())?;
        let proxy_address = var(ENV_PROXY).filter(|proxy| !proxy.trim().is_empty());
        let proxy_port = var(ENV_PORT).and_then(|port| match port.trim().parse::<i32>() {
            Ok(port) => Some(port),
            Err(_) => {
                warn!("Ignoring malformed {}: {:?}", ENV_PORT, port);
                None
            }
        });

        Some(Self {
            mmsc_url,
            proxy_address,
            proxy_port,
        })
    }

    /// Default override file path (`~/.config/courier/mms-gateway.json`)
    pub fn default_path() -> Option<PathBuf> {
        ::config::config_path(GATEWAY_FILE)
    }

    pub fn into_settings(self) -> TransactionSettings {
        TransactionSettings::new(
            self.mmsc_url,
            self.proxy_address,
            self.proxy_port.unwrap_or(NO_PROXY_PORT),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_parse_override_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(GATEWAY_FILE);
        std::fs::write(
            &path,
            r#"{ "mmsc_url": "http://mmsc.example", "proxy_address": "10.0.0.1", "proxy_port": 8080 }"#,
        )
        .unwrap();

        let gateway = GatewayOverride::from_file(&path).unwrap();
        let settings = gateway.into_settings();
        assert_eq!(settings.mmsc_url(), Some("http://mmsc.example"));
        assert_eq!(settings.proxy_port(), 8080);
    }

    #[test]
    fn test_override_without_proxy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(GATEWAY_FILE);
        std::fs::write(&path, r#"{ "mmsc_url": "http://mmsc.example" }"#).unwrap();

        let settings = GatewayOverride::from_file(&path).unwrap().into_settings();
        assert!(!settings.is_proxy_set());
        assert_eq!(settings.proxy_port(), NO_PROXY_PORT);
    }

    // Sole test in this crate that touches the process environment
    #[test]
    fn test_load_prefers_file_over_env() {
        let dir = tempfile::tempdir().unwrap();
        // SAFETY: no other test in this crate reads or writes these variables
        unsafe {
            std::env::set_var(::config::CONFIG_DIR_ENV, dir.path());
            std::env::remove_var(ENV_PROXY);
            std::env::remove_var(ENV_PORT);
            std::env::remove_var(ENV_MMSC_URL);
        }

        assert_eq!(
            GatewayOverride::default_path(),
            Some(dir.path().join(GATEWAY_FILE))
        );
        assert_eq!(GatewayOverride::load().unwrap(), None);

        unsafe { std::env::set_var(ENV_MMSC_URL, "http://env.example") };
        let from_env = GatewayOverride::load().unwrap().unwrap();
        assert_eq!(from_env.mmsc_url, "http://env.example");

        std::fs::write(
            dir.path().join(GATEWAY_FILE),
            r#"{ "mmsc_url": "http://file.example" }"#,
        )
        .unwrap();
        let from_file = GatewayOverride::load().unwrap().unwrap();
        assert_eq!(from_file.mmsc_url, "http://file.example");

        // A broken file is reported, not skipped in favour of the environment
        std::fs::write(dir.path().join(GATEWAY_FILE), "{ mmsc_url").unwrap();
        assert!(GatewayOverride::load().is_err());

        unsafe {
            std::env::remove_var(ENV_MMSC_URL);
            std::env::remove_var(::config::CONFIG_DIR_ENV);
        }
    }

    #[test]
    fn test_from_vars() {
        let gateway = GatewayOverride::from_vars(vars(&[
            (ENV_MMSC_URL, "http://mmsc.example"),
            (ENV_PROXY, "10.0.0.1"),
            (ENV_PORT, "9201"),
        ]))
        .unwrap();

        assert_eq!(gateway.proxy_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(gateway.proxy_port, Some(9201));
    }

    #[test]
    fn test_from_vars_requires_mmsc() {
        assert!(GatewayOverride::from_vars(vars(&[(ENV_PROXY, "10.0.0.1")])).is_none());
        assert!(GatewayOverride::from_vars(vars(&[(ENV_MMSC_URL, "  ")])).is_none());
    }

    #[test]
    fn test_from_vars_bad_port_is_unset() {
        let gateway = GatewayOverride::from_vars(vars(&[
            (ENV_MMSC_URL, "http://mmsc.example"),
            (ENV_PORT, "eighty"),
        ]))
        .unwrap();

        assert_eq!(gateway.proxy_port, None);
        assert_eq!(gateway.into_settings().proxy_port(), NO_PROXY_PORT);
    }
}
