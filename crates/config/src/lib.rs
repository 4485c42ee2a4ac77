//! Configuration files for Courier
//!
//! All Courier config lives in one directory, `~/.config/courier/` by default.
//! Setting `COURIER_CONFIG_DIR` points it somewhere else (handy for tests and
//! for running several hosts side by side).
//!
//! Call [`init`] once at startup so the directory exists before anything
//! tries to write into it.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "COURIER_CONFIG_DIR";

const APP_DIR_NAME: &str = "courier";

/// Create the config directory if needed and return its path.
pub fn init() -> Result<PathBuf> {
    ensure_config_dir()
}

/// The Courier config directory
///
/// `COURIER_CONFIG_DIR` wins when set and non-empty, otherwise the platform
/// config dir joined with `courier`.
pub fn config_dir() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::config_dir().map(|base| base.join(APP_DIR_NAME)),
    }
}

/// Path of `filename` inside the config directory
pub fn config_path(filename: &str) -> Option<PathBuf> {
    Some(config_dir()?.join(filename))
}

/// Whether `filename` exists in the config directory
pub fn config_exists(filename: &str) -> bool {
    config_path(filename).is_some_and(|path| path.is_file())
}

/// Deserialize `filename` from the config directory
pub fn load_json<T: DeserializeOwned>(filename: &str) -> Result<T> {
    let path = config_path(filename).context("Could not determine config directory")?;
    load_json_file(&path)
}

/// Deserialize `filename` if it exists, `Ok(None)` if it doesn't
///
/// A file that exists but fails to parse is still an error.
pub fn load_optional_json<T: DeserializeOwned>(filename: &str) -> Result<Option<T>> {
    if !config_exists(filename) {
        return Ok(None);
    }
    load_json(filename).map(Some)
}

/// Deserialize a JSON file at an arbitrary path
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Make sure the config directory exists
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dir = config_dir().context("Could not determine config directory")?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
    Ok(dir)
}

/// Serialize `value` as pretty JSON into `filename` in the config directory
pub fn save_json<T: Serialize>(filename: &str, value: &T) -> Result<PathBuf> {
    let path = ensure_config_dir()?.join(filename);
    let body = serde_json::to_string_pretty(value)?;
    std::fs::write(&path, body)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        name: String,
        port: u16,
    }

    // The only test that touches the process environment; every helper that
    // resolves the config dir is covered here so nothing races on the variable.
    #[test]
    fn test_config_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("courier-test");
        // SAFETY: no other test in this crate reads or writes the environment
        unsafe { std::env::set_var(CONFIG_DIR_ENV, &root) };

        assert_eq!(config_dir(), Some(root.clone()));
        assert_eq!(config_path("apns.json"), Some(root.join("apns.json")));
        assert!(!config_exists("sample.json"));

        // Missing file is not an error
        let missing: Option<Sample> = load_optional_json("sample.json").unwrap();
        assert!(missing.is_none());

        assert_eq!(init().unwrap(), root);
        assert!(root.is_dir());

        let sample = Sample {
            name: "gateway".to_string(),
            port: 8080,
        };
        let saved = save_json("sample.json", &sample).unwrap();
        assert_eq!(saved, root.join("sample.json"));
        assert!(config_exists("sample.json"));
        assert_eq!(load_json::<Sample>("sample.json").unwrap(), sample);
        assert_eq!(
            load_optional_json::<Sample>("sample.json").unwrap(),
            Some(sample)
        );

        // Present but malformed is an error
        std::fs::write(root.join("broken.json"), "{ not json").unwrap();
        assert!(load_optional_json::<Sample>("broken.json").is_err());

        // A directory with the file's name doesn't count as the file
        std::fs::create_dir(root.join("dir.json")).unwrap();
        assert!(!config_exists("dir.json"));

        // Empty value falls back to the platform dir
        unsafe { std::env::set_var(CONFIG_DIR_ENV, "") };
        assert_eq!(config_dir(), dirs::config_dir().map(|base| base.join(APP_DIR_NAME)));

        unsafe { std::env::remove_var(CONFIG_DIR_ENV) };
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.json");
        std::fs::write(&path, r#"{ "name": "gateway", "port": 8080 }"#).unwrap();

        let sample: Sample = load_json_file(&path).unwrap();
        assert_eq!(
            sample,
            Sample {
                name: "gateway".to_string(),
                port: 8080
            }
        );
    }

    #[test]
    fn test_load_json_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<Sample> = load_json_file(&dir.path().join("nope.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_json_file_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result: Result<Sample> = load_json_file(&path);
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to parse config file"));
    }
}
