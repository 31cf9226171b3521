//! Reading upcoming reservations from the account page.

use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;
use courtbot_config::{ColumnConfig, SiteConfig};
use courtbot_protocols::{PageDriver, Reservation, TimeOfDay};
use tracing::{debug, info};

use crate::error::ScrapeError;
use crate::wait::wait_for_selector;

const XPATH_PREFIX: &str = "xpath=";

/// Walks the reservations table, opening each row to read its players.
#[derive(Debug, Clone)]
pub struct ReservationScraper {
    url: String,
    date_format: String,
    /// Row selector without the `xpath=` prefix.
    rows: String,
    headers: String,
    players: String,
    detail_marker: String,
    back: String,
    columns: ColumnConfig,
    poll_attempts: u32,
    poll_interval: Duration,
}

impl ReservationScraper {
    pub fn from_config(config: &SiteConfig) -> Self {
        let selectors = &config.selectors;
        let rows = selectors
            .reservation_rows
            .strip_prefix(XPATH_PREFIX)
            .unwrap_or(&selectors.reservation_rows)
            .to_string();
        Self {
            url: config.site.reservations_url.clone(),
            date_format: config.site.date_format.clone(),
            rows,
            headers: selectors.reservation_headers.clone(),
            players: selectors.reservation_players.clone(),
            detail_marker: selectors.reservation_detail_marker.clone(),
            back: selectors.reservation_back.clone(),
            columns: config.columns.clone(),
            poll_attempts: config.timing.poll_attempts,
            poll_interval: config.timing.poll_interval(),
        }
    }

    pub fn with_polling(mut self, attempts: u32, interval: Duration) -> Self {
        self.poll_attempts = attempts;
        self.poll_interval = interval;
        self
    }

    fn rows_selector(&self) -> String {
        format!("{}{}", XPATH_PREFIX, self.rows)
    }

    /// Cells of the 0-based `row`.
    fn cells_selector(&self, row: usize) -> String {
        format!("{}({})[{}]/td", XPATH_PREFIX, self.rows, row + 1)
    }

    fn link_selector(&self, row: usize) -> String {
        format!("{}({})[{}]//a", XPATH_PREFIX, self.rows, row + 1)
    }

    /// Read every listed reservation, one row at a time.
    pub async fn fetch_reservations(
        &self,
        driver: &dyn PageDriver,
    ) -> Result<Vec<Reservation>, ScrapeError> {
        driver.navigate(&self.url).await?;

        let count = driver.query_all(&self.rows_selector()).await?.len();
        info!("Found {} reservations", count);

        let headers: Vec<String> = texts(driver, &self.headers)
            .await?
            .iter()
            .map(|h| to_snake_case(h))
            .collect();
        debug!("Reservation columns: {:?}", headers);

        let mut reservations = Vec::with_capacity(count);
        for row in 0..count {
            let cells = texts(driver, &self.cells_selector(row)).await?;
            let fields: HashMap<&str, &str> = headers
                .iter()
                .map(String::as_str)
                .zip(cells.iter().map(|c| c.trim()))
                .collect();
            let mut reservation = self.parse_row(row, &fields)?;

            driver.click(&self.link_selector(row)).await?;
            let opened = wait_for_selector(
                driver,
                &self.detail_marker,
                self.poll_attempts,
                self.poll_interval,
            )
            .await?;
            if !opened {
                return Err(ScrapeError::DetailTimeout(row));
            }

            reservation.players = texts(driver, &self.players)
                .await?
                .into_iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
            debug!(
                "Reservation {} {} {} with {:?}",
                reservation.date, reservation.start_time, reservation.court_label, reservation.players
            );
            reservations.push(reservation);

            driver.click(&self.back).await?;
            let returned = wait_for_selector(
                driver,
                &self.rows_selector(),
                self.poll_attempts,
                self.poll_interval,
            )
            .await?;
            if !returned {
                return Err(ScrapeError::ListTimeout(row));
            }
        }

        Ok(reservations)
    }

    fn parse_row(&self, row: usize, fields: &HashMap<&str, &str>) -> Result<Reservation, ScrapeError> {
        let column = |name: &str| {
            fields
                .get(name)
                .copied()
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ScrapeError::MissingColumn {
                    row,
                    column: name.to_string(),
                })
        };

        let date_text = column(&self.columns.date)?;
        let date = NaiveDate::parse_from_str(date_text, &self.date_format).map_err(|_| {
            ScrapeError::MalformedRow {
                row,
                field: "date",
                value: date_text.to_string(),
            }
        })?;

        let time_text = column(&self.columns.start_time)?;
        let start_time: TimeOfDay = time_text.parse().map_err(|_| ScrapeError::MalformedRow {
            row,
            field: "start time",
            value: time_text.to_string(),
        })?;

        let court_label = column(&self.columns.court)?.to_string();

        Ok(Reservation {
            date,
            start_time,
            court_label,
            players: Vec::new(),
        })
    }
}

async fn texts(driver: &dyn PageDriver, selector: &str) -> Result<Vec<String>, ScrapeError> {
    let mut out = Vec::new();
    for element in driver.query_all(selector).await? {
        out.push(driver.element_text(&element).await?);
    }
    Ok(out)
}

/// Normalise a column header into a snake_case key.
///
/// Runs of non-alphanumeric characters separate words, as do case
/// changes: `Begintijd` → `begintijd`, `Eind tijd` → `eind_tijd`,
/// `CourtID` → `court_id`.
pub fn to_snake_case(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }

        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_numeric()
                || (prev.is_uppercase() && next_lower);
            if boundary && !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }

    while out.ends_with('_') {
        out.pop();
    }
    out
}

#[cfg(test)]
#[path = "scrape_tests.rs"]
mod tests;
