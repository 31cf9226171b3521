//! Date navigation on the booking grid.

use std::time::Duration;

use chrono::NaiveDate;
use courtbot_config::SiteConfig;
use courtbot_protocols::{BookingRequest, PageDriver};
use tracing::{debug, info};

use crate::error::BookingError;

/// Drives the grid's date view forward to the requested date.
///
/// The view only steps forward one day at a time, so the walk is an
/// explicit loop bounded by `max_steps`.
#[derive(Debug, Clone)]
pub struct DateNavigator {
    date_title: String,
    next_day: String,
    date_format: String,
    max_steps: u32,
    settle: Duration,
}

impl DateNavigator {
    pub fn new(
        date_title: impl Into<String>,
        next_day: impl Into<String>,
        date_format: impl Into<String>,
        max_steps: u32,
        settle: Duration,
    ) -> Self {
        Self {
            date_title: date_title.into(),
            next_day: next_day.into(),
            date_format: date_format.into(),
            max_steps,
            settle,
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(
            &config.selectors.date_title,
            &config.selectors.next_day,
            &config.site.date_format,
            config.booking.max_navigation_steps,
            config.timing.settle(),
        )
    }

    /// Resolve the request's date and reject past or skipped dates.
    pub fn resolve(&self, request: &BookingRequest, today: NaiveDate) -> Result<NaiveDate, BookingError> {
        let date = request.resolve_date(today);

        if request.target_date.is_none() {
            info!(
                "No reservation date specified, policy {:?} gives {}",
                request.default_policy, date
            );
        }

        if date < today {
            return Err(BookingError::PastDate { date, today });
        }
        if request.is_skipped(date) {
            return Err(BookingError::SkippedDate(date));
        }
        Ok(date)
    }

    /// Validate the target and step the view until it shows it.
    ///
    /// No driver action is issued when validation fails.
    pub async fn navigate_to(
        &self,
        driver: &dyn PageDriver,
        request: &BookingRequest,
        today: NaiveDate,
    ) -> Result<NaiveDate, BookingError> {
        let target = self.resolve(request, today)?;

        let mut shown = self.read_date(driver).await?;
        let mut steps = 0;
        while shown < target {
            if steps >= self.max_steps {
                return Err(BookingError::NavigationStuck {
                    steps,
                    displayed: shown,
                    target,
                });
            }
            driver.click(&self.next_day).await?;
            steps += 1;
            tokio::time::sleep(self.settle).await;
            shown = self.read_date(driver).await?;
            debug!("Date view at {} (step {})", shown, steps);
        }

        info!("Selected date {} reached target {}", shown, target);
        Ok(target)
    }

    async fn read_date(&self, driver: &dyn PageDriver) -> Result<NaiveDate, BookingError> {
        let text = driver.text_content(&self.date_title).await?;
        parse_displayed_date(&text, &self.date_format)
            .ok_or_else(|| BookingError::UnreadableDate(text.trim().to_string()))
    }
}

/// First whitespace-separated token of `text` that parses with `format`.
///
/// Titles look like `vr 16-10-2026`; the weekday prefix is ignored.
pub fn parse_displayed_date(text: &str, format: &str) -> Option<NaiveDate> {
    text.split_whitespace()
        .find_map(|token| NaiveDate::parse_from_str(token, format).ok())
}

#[cfg(test)]
#[path = "navigator_tests.rs"]
mod tests;
