//! Calendar export and browser settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Calendar export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Root directory of the filesystem blob store.
    pub store_dir: PathBuf,
    pub key_prefix: String,
    /// Player filters; each gets its own export next to the unfiltered one.
    pub players: Vec<String>,
    pub calendar_name: String,
    pub product_id: String,
    pub location: String,
    /// IANA zone the site's wall-clock times are in.
    pub timezone: String,
    pub event_minutes: u32,
    pub uid_domain: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            store_dir: dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".courtbot")
                .join("exports"),
            key_prefix: "calendar".to_string(),
            players: vec!["vera".to_string()],
            calendar_name: "Squash Reserveringen".to_string(),
            product_id: "-//Courtbot//Squash Utrecht//EN".to_string(),
            location: "Squash Utrecht".to_string(),
            timezone: "Europe/Amsterdam".to_string(),
            event_minutes: 60,
            uid_domain: "example.com".to_string(),
        }
    }
}

/// Browser launch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub debug_port: u16,
    /// Chrome profile directory; a fresh one under `~/.courtbot` if unset.
    pub profile_dir: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: 9222,
            profile_dir: None,
        }
    }
}
