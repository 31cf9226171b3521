//! Opponent selection and booking confirmation.

use std::collections::BTreeMap;
use std::time::Duration;

use courtbot_config::SiteConfig;
use courtbot_protocols::{DriverError, PageDriver};
use tracing::{debug, info};

use crate::error::BookingError;
use crate::wait::wait_for_selector;

/// Fills in the booking popup and confirms it.
#[derive(Debug, Clone)]
pub struct ReservationCommitter {
    opponents: BTreeMap<String, String>,
    opponent_select: String,
    first_submit: String,
    final_submit: String,
    poll_attempts: u32,
    poll_interval: Duration,
    dry_run_pause: Duration,
}

impl ReservationCommitter {
    pub fn new(
        opponents: BTreeMap<String, String>,
        opponent_select: impl Into<String>,
        first_submit: impl Into<String>,
        final_submit: impl Into<String>,
    ) -> Self {
        Self {
            opponents,
            opponent_select: opponent_select.into(),
            first_submit: first_submit.into(),
            final_submit: final_submit.into(),
            poll_attempts: 1,
            poll_interval: Duration::ZERO,
            dry_run_pause: Duration::ZERO,
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(
            config.booking.opponents.clone(),
            &config.selectors.opponent_select,
            &config.selectors.first_submit,
            &config.selectors.final_submit,
        )
        .with_polling(config.timing.poll_attempts, config.timing.poll_interval())
        .with_dry_run_pause(config.timing.dry_run_pause())
    }

    /// Bound the wait for the final confirmation button.
    pub fn with_polling(mut self, attempts: u32, interval: Duration) -> Self {
        self.poll_attempts = attempts;
        self.poll_interval = interval;
        self
    }

    pub fn with_dry_run_pause(mut self, pause: Duration) -> Self {
        self.dry_run_pause = pause;
        self
    }

    /// Site player id for an opponent name.
    pub fn opponent_id(&self, opponent: &str) -> Result<&str, BookingError> {
        self.opponents
            .get(opponent)
            .map(String::as_str)
            .ok_or_else(|| BookingError::UnknownOpponent(opponent.to_string()))
    }

    /// Select `opponent` and submit the booking.
    ///
    /// The first confirmation is always submitted. The final one is the
    /// irreversible step and is only issued when `dry_run` is false.
    /// Returns `Ok(false)` if the final confirmation never became available.
    pub async fn commit(
        &self,
        driver: &dyn PageDriver,
        opponent: &str,
        dry_run: bool,
    ) -> Result<bool, BookingError> {
        let player_id = self.opponent_id(opponent)?;

        driver
            .select_option(&self.opponent_select, player_id)
            .await
            .map_err(|e| match e {
                DriverError::OptionNotFound { .. } => {
                    BookingError::UnknownOpponent(format!("{} (player id {})", opponent, player_id))
                }
                other => BookingError::CommitFailed(other.to_string()),
            })?;
        debug!("Selected opponent {}", opponent);

        driver
            .click(&self.first_submit)
            .await
            .map_err(|e| BookingError::CommitFailed(e.to_string()))?;

        if dry_run {
            info!("[DRY RUN] Skipping final confirmation");
            tokio::time::sleep(self.dry_run_pause).await;
            return Ok(true);
        }

        let ready = wait_for_selector(
            driver,
            &self.final_submit,
            self.poll_attempts,
            self.poll_interval,
        )
        .await
        .map_err(|e| BookingError::CommitFailed(e.to_string()))?;
        if !ready {
            return Ok(false);
        }

        driver
            .click(&self.final_submit)
            .await
            .map_err(|e| BookingError::CommitFailed(e.to_string()))?;
        info!("Reservation confirmed with {}", opponent);
        Ok(true)
    }
}
