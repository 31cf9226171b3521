//! Booking rules and timing.

use std::collections::BTreeMap;
use std::time::Duration;

use courtbot_protocols::ScanOrder;
use serde::{Deserialize, Serialize};

/// Booking rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Opponent name to the site's player id.
    #[serde(default = "default_opponents")]
    pub opponents: BTreeMap<String, String>,

    /// Courts whose label starts with this (case-insensitive) can only be
    /// booked at the reception.
    #[serde(default = "default_excluded_court_prefix")]
    pub excluded_court_prefix: String,

    #[serde(default)]
    pub scan_order: ScanOrder,

    #[serde(default = "default_max_navigation_steps")]
    pub max_navigation_steps: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            opponents: default_opponents(),
            excluded_court_prefix: default_excluded_court_prefix(),
            scan_order: ScanOrder::default(),
            max_navigation_steps: default_max_navigation_steps(),
        }
    }
}

fn default_opponents() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("vera".to_string(), "1073483".to_string()),
        ("koen".to_string(), "1340920".to_string()),
    ])
}

fn default_excluded_court_prefix() -> String {
    "court 1 ".to_string()
}

fn default_max_navigation_steps() -> u32 {
    400
}

/// Delays and bounds, in milliseconds unless noted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Pause after each action that re-renders the booking grid.
    pub settle_ms: u64,
    /// Interval and bound of every "wait until present" poll.
    pub poll_interval_ms: u64,
    pub poll_attempts: u32,
    /// Pause standing in for the final confirmation in dry-run mode.
    pub dry_run_pause_ms: u64,
    /// Wall-clock limit for a whole run, in seconds.
    pub run_timeout_secs: u64,
}

impl TimingConfig {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn dry_run_pause(&self) -> Duration {
        Duration::from_millis(self.dry_run_pause_ms)
    }

    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.run_timeout_secs)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            settle_ms: 500,
            poll_interval_ms: 500,
            poll_attempts: 20,
            dry_run_pause_ms: 1000,
            run_timeout_secs: 180,
        }
    }
}
