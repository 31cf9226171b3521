//! Reservations scraped from the user's account page.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::TimeOfDay;

/// An upcoming or past reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub court_label: String,
    /// Player names in the order the site lists them.
    #[serde(default)]
    pub players: Vec<String>,
}

impl Reservation {
    /// Identity used for de-duplication across exports.
    pub fn key(&self) -> (NaiveDate, TimeOfDay, &str) {
        (self.date, self.start_time, self.court_label.as_str())
    }

    /// Case-insensitive substring match against any player name.
    pub fn has_player(&self, name: &str) -> bool {
        let needle = name.to_lowercase();
        self.players
            .iter()
            .any(|p| p.to_lowercase().contains(&needle))
    }
}
