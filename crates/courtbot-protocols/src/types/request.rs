//! Booking request payload.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::TimeOfDay;

/// Date to book when the request names none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePolicy {
    /// One week after today, when the booking window opens.
    #[default]
    NextWeek,
    Today,
}

impl DatePolicy {
    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match self {
            DatePolicy::NextWeek => today + Days::new(7),
            DatePolicy::Today => today,
        }
    }
}

/// Order in which the free cells of one time row are tried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanOrder {
    /// Last listed cell first. The site lists the preferred hall last.
    #[default]
    Reverse,
    /// Document order.
    Forward,
}

impl ScanOrder {
    pub fn arrange<T>(&self, mut items: Vec<T>) -> Vec<T> {
        if *self == ScanOrder::Reverse {
            items.reverse();
        }
        items
    }
}

/// One booking attempt as supplied by the calling harness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookingRequest {
    /// Skip the irreversible confirmation.
    #[serde(default = "default_true")]
    pub dry_run: bool,

    /// Explicit date to book; overrides `default_policy`.
    #[serde(default)]
    pub target_date: Option<NaiveDate>,

    #[serde(default)]
    pub default_policy: DatePolicy,

    /// Dates on which no booking may be placed.
    #[serde(default)]
    pub skip_dates: BTreeSet<NaiveDate>,

    /// Opponent name, resolved to a player id by the site config.
    #[serde(default = "default_opponent")]
    pub opponent: String,

    /// Member-court times, most preferred first.
    #[serde(default = "default_member_times")]
    pub member_times: Vec<TimeOfDay>,

    #[serde(default = "default_true")]
    pub member_only: bool,

    /// Non-member-court times, most preferred first.
    #[serde(default = "default_non_member_times")]
    pub non_member_times: Vec<TimeOfDay>,

    /// Overrides the configured cell scan order.
    #[serde(default)]
    pub scan_order: Option<ScanOrder>,
}

impl BookingRequest {
    /// The date this request targets, before any validation.
    pub fn resolve_date(&self, today: NaiveDate) -> NaiveDate {
        self.target_date
            .unwrap_or_else(|| self.default_policy.resolve(today))
    }

    pub fn is_skipped(&self, date: NaiveDate) -> bool {
        self.skip_dates.contains(&date)
    }
}

impl Default for BookingRequest {
    fn default() -> Self {
        Self {
            dry_run: true,
            target_date: None,
            default_policy: DatePolicy::default(),
            skip_dates: BTreeSet::new(),
            opponent: default_opponent(),
            member_times: default_member_times(),
            member_only: true,
            non_member_times: default_non_member_times(),
            scan_order: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_opponent() -> String {
    "vera".to_string()
}

fn default_member_times() -> Vec<TimeOfDay> {
    vec![TimeOfDay::from_parts(20, 30), TimeOfDay::from_parts(19, 45)]
}

fn default_non_member_times() -> Vec<TimeOfDay> {
    vec![TimeOfDay::from_parts(20, 15), TimeOfDay::from_parts(19, 30)]
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
