//! # Courtbot Protocols
//!
//! Shared vocabulary for the courtbot workspace.
//! Contains only types and interface definitions - no implementations
//! beyond trivial clocks.
//!
//! ## Core Traits
//!
//! - [`PageDriver`] - One live browser page: navigate, query, click, read
//! - [`BlobStore`] - Key/value storage for published exports
//! - [`CalendarRenderer`] - Turns reservations into a calendar document
//! - [`Clock`] - Source of "today" for date decisions

pub mod calendar;
pub mod clock;
pub mod driver;
pub mod error;
pub mod store;
pub mod types;

pub use calendar::CalendarRenderer;
pub use clock::{Clock, FixedClock, SystemClock};
pub use driver::{ElementHandle, PageDriver};
pub use error::{DriverError, StoreError};
pub use store::BlobStore;
pub use types::*;
