//! Error types for booking and calendar sync.

use chrono::NaiveDate;
use courtbot_protocols::{DriverError, FailureKind, StoreError};
use thiserror::Error;

/// Failure of one booking stage. Every variant aborts the attempt.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Login failed: not logged in after {attempts} checks")]
    LoginFailed { attempts: u32 },

    #[error("Requested date {date} is in the past (today is {today})")]
    PastDate { date: NaiveDate, today: NaiveDate },

    #[error("Requested date {0} is in the skip list")]
    SkippedDate(NaiveDate),

    #[error("Calendar stuck at {displayed} after {steps} steps towards {target}")]
    NavigationStuck {
        steps: u32,
        displayed: NaiveDate,
        target: NaiveDate,
    },

    #[error("Unreadable calendar date: '{0}'")]
    UnreadableDate(String),

    #[error("No acceptable slot at any of {times} preferred time(s)")]
    NoSlotAvailable { times: usize },

    #[error("Unknown opponent: {0}")]
    UnknownOpponent(String),

    #[error("Commit failed: {0}")]
    CommitFailed(String),

    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),
}

impl BookingError {
    /// Classification reported in the outcome.
    pub fn kind(&self) -> FailureKind {
        match self {
            BookingError::LoginFailed { .. } => FailureKind::LoginFailed,
            BookingError::PastDate { .. } => FailureKind::PastDate,
            BookingError::SkippedDate(_) => FailureKind::SkippedDate,
            BookingError::NavigationStuck { .. } => FailureKind::NavigationStuck,
            BookingError::NoSlotAvailable { .. } => FailureKind::NoSlotAvailable,
            BookingError::UnknownOpponent(_) => FailureKind::UnknownOpponent,
            BookingError::CommitFailed(_) => FailureKind::CommitFailed,
            BookingError::UnreadableDate(_) | BookingError::Driver(_) => FailureKind::DriverFailure,
        }
    }
}

/// Failure while reading reservations from the account page.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Reservation row {row} is missing column '{column}'")]
    MissingColumn { row: usize, column: String },

    #[error("Reservation row {row}: cannot parse {field} from '{value}'")]
    MalformedRow {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("Reservation detail did not open for row {0}")]
    DetailTimeout(usize),

    #[error("Reservation list did not come back after row {0}")]
    ListTimeout(usize),

    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),
}

/// Failure of the scrape-and-publish pipeline.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Login failed: {0}")]
    Login(#[source] BookingError),

    #[error("Scrape failed: {0}")]
    Scrape(#[from] ScrapeError),

    #[error("Stored history at {key} is unreadable: {source}")]
    CorruptHistory {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}
