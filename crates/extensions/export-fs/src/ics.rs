//! iCalendar rendering.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use courtbot_config::ExportConfig;
use courtbot_protocols::{CalendarRenderer, Reservation};

const CRLF: &str = "\r\n";
/// Content lines are folded after this many octets.
const FOLD_AT: usize = 75;
const LOCAL_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Renders reservations as a VCALENDAR with one VEVENT each.
///
/// Event times are local to the configured time zone and tagged with its
/// TZID.
#[derive(Debug, Clone)]
pub struct IcsRenderer {
    calendar_name: String,
    product_id: String,
    location: String,
    timezone: String,
    event_minutes: u32,
    uid_domain: String,
    /// Fixed DTSTAMP; the current time when unset.
    stamp: Option<DateTime<Utc>>,
}

impl IcsRenderer {
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            calendar_name: config.calendar_name.clone(),
            product_id: config.product_id.clone(),
            location: config.location.clone(),
            timezone: config.timezone.clone(),
            event_minutes: config.event_minutes,
            uid_domain: config.uid_domain.clone(),
            stamp: None,
        }
    }

    pub fn with_stamp(mut self, stamp: DateTime<Utc>) -> Self {
        self.stamp = Some(stamp);
        self
    }

    /// Stable identifier, so re-published events replace earlier copies.
    pub fn uid(&self, reservation: &Reservation) -> String {
        let court: String = reservation
            .court_label
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        format!(
            "squash-{}-{}-{}@{}",
            reservation.date.format("%Y%m%d"),
            reservation.start_time.compact(),
            court,
            self.uid_domain
        )
    }

    pub fn summary(reservation: &Reservation) -> String {
        format!(
            "\u{1F3F8} {} {}",
            reservation.court_label, reservation.start_time
        )
    }

    fn start(reservation: &Reservation) -> NaiveDateTime {
        reservation.date.and_time(reservation.start_time.into())
    }

    fn push_event(&self, out: &mut Vec<String>, reservation: &Reservation, stamp: &str) {
        let start = Self::start(reservation);
        let end = start + Duration::minutes(i64::from(self.event_minutes));

        out.push("BEGIN:VEVENT".to_string());
        out.push(format!("UID:{}", escape(&self.uid(reservation))));
        out.push(format!("DTSTAMP:{}", stamp));
        out.push(format!(
            "DTSTART;TZID={}:{}",
            self.timezone,
            start.format(LOCAL_FORMAT)
        ));
        out.push(format!(
            "DTEND;TZID={}:{}",
            self.timezone,
            end.format(LOCAL_FORMAT)
        ));
        out.push(format!("SUMMARY:{}", escape(&Self::summary(reservation))));
        out.push(format!("LOCATION:{}", escape(&self.location)));
        if !reservation.players.is_empty() {
            out.push(format!(
                "DESCRIPTION:{}",
                escape(&reservation.players.join("\n"))
            ));
        }
        out.push("END:VEVENT".to_string());
    }
}

impl CalendarRenderer for IcsRenderer {
    fn render(&self, reservations: &[Reservation]) -> String {
        let stamp = self
            .stamp
            .unwrap_or_else(Utc::now)
            .format("%Y%m%dT%H%M%SZ")
            .to_string();

        let mut lines = vec![
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            format!("PRODID:{}", self.product_id),
            "CALSCALE:GREGORIAN".to_string(),
            format!("X-WR-CALNAME:{}", escape(&self.calendar_name)),
            format!("X-WR-TIMEZONE:{}", self.timezone),
        ];
        for reservation in reservations {
            self.push_event(&mut lines, reservation, &stamp);
        }
        lines.push("END:VCALENDAR".to_string());

        lines
            .iter()
            .map(|line| fold(line) + CRLF)
            .collect()
    }
}

/// Escape a TEXT value.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Fold a content line into chunks of at most [`FOLD_AT`] octets,
/// never splitting a character.
fn fold(line: &str) -> String {
    if line.len() <= FOLD_AT {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + line.len() / FOLD_AT * 3);
    let mut width = 0;
    for c in line.chars() {
        let len = c.len_utf8();
        if width + len > FOLD_AT {
            out.push_str(CRLF);
            out.push(' ');
            // The leading space counts towards the next line.
            width = 1;
        }
        out.push(c);
        width += len;
    }
    out
}

#[cfg(test)]
#[path = "ics_tests.rs"]
mod tests;
