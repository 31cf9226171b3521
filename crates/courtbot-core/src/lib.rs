//! # Courtbot Core
//!
//! The booking state machine and the reservation export pipeline.
//!
//! ## Booking
//!
//! ```text
//! login ─► DateNavigator ─► resolve_order ─► SlotSelector ─► ReservationCommitter
//! ```
//!
//! [`BookingOrchestrator`] runs these stages fail-fast against one
//! [`PageDriver`](courtbot_protocols::PageDriver) and folds the result into a
//! [`BookingOutcome`](courtbot_protocols::BookingOutcome). No stage is retried.
//!
//! ## Calendar sync
//!
//! [`ReservationScraper`] reads the account's upcoming reservations
//! sequentially, then [`CalendarSync`] merges them with the published
//! history and writes every export variant concurrently.

mod committer;
mod court;
mod error;
mod login;
mod navigator;
mod orchestrator;
mod preference;
mod scrape;
mod selector;
mod sync;
pub mod testing;
mod wait;

pub use committer::ReservationCommitter;
pub use court::{CourtRule, PrefixRule};
pub use error::{BookingError, ScrapeError, SyncError};
pub use login::Login;
pub use navigator::{parse_displayed_date, DateNavigator};
pub use orchestrator::BookingOrchestrator;
pub use preference::resolve_order;
pub use scrape::{to_snake_case, ReservationScraper};
pub use selector::{SlotMiss, SlotSearch, SlotSelector, TimeMiss};
pub use sync::{merge_history, CalendarSync, ExportVariant, PublishReport};
pub use wait::wait_for_selector;
