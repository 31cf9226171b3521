//! Calendar rendering.

use crate::types::Reservation;

/// Renders reservations into a calendar document.
pub trait CalendarRenderer: Send + Sync {
    fn render(&self, reservations: &[Reservation]) -> String;

    fn content_type(&self) -> &'static str {
        "text/calendar"
    }

    /// File extension used for storage keys, without the dot.
    fn extension(&self) -> &'static str {
        "ics"
    }
}
