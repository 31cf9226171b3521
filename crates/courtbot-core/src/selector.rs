//! Slot selection over the booking grid.

use std::sync::Arc;
use std::time::Duration;

use courtbot_config::SiteConfig;
use courtbot_protocols::{PageDriver, ScanOrder, SlotCandidate, TimeOfDay};
use tracing::{debug, info, warn};

use crate::court::{CourtRule, PrefixRule};
use crate::error::BookingError;

/// Why a preferred time produced no slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotMiss {
    /// The row had no free cells.
    NoFreeSlots,
    /// Every free cell was on an excluded court.
    AllExcluded { skipped: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeMiss {
    pub time: TimeOfDay,
    pub miss: SlotMiss,
}

/// Record of one search over the preference order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotSearch {
    /// The committed choice; the grid popup is left open on it.
    pub chosen: Option<SlotCandidate>,
    /// Times tried before the choice, in order.
    pub misses: Vec<TimeMiss>,
    /// Cells rejected by the court rule.
    pub skipped: Vec<SlotCandidate>,
}

/// Walks preferred times and their free cells until one is acceptable.
#[derive(Clone)]
pub struct SlotSelector {
    free_slot: String,
    court_label: String,
    popup_close: String,
    settle: Duration,
    rule: Arc<dyn CourtRule>,
}

impl SlotSelector {
    pub fn new(
        free_slot: impl Into<String>,
        court_label: impl Into<String>,
        popup_close: impl Into<String>,
        settle: Duration,
        rule: Arc<dyn CourtRule>,
    ) -> Self {
        Self {
            free_slot: free_slot.into(),
            court_label: court_label.into(),
            popup_close: popup_close.into(),
            settle,
            rule,
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(
            &config.selectors.free_slot,
            &config.selectors.court_label,
            &config.selectors.popup_close,
            config.timing.settle(),
            Arc::new(PrefixRule::new(&config.booking.excluded_court_prefix)),
        )
    }

    /// Replace the court exclusion rule.
    pub fn with_rule(mut self, rule: Arc<dyn CourtRule>) -> Self {
        self.rule = rule;
        self
    }

    fn cells_for(&self, time: TimeOfDay) -> String {
        self.free_slot
            .replace(courtbot_config::TIME_PLACEHOLDER, &time.to_string())
    }

    /// Try `times` in order and commit to the first acceptable cell.
    ///
    /// Within a time, cells are tried in `order`. Each cell is selected
    /// tentatively; if its court is excluded the popup is closed and the
    /// next cell of the same time is tried. The search stops at the first
    /// cell whose court passes the rule.
    pub async fn select_slot(
        &self,
        driver: &dyn PageDriver,
        times: &[TimeOfDay],
        order: ScanOrder,
    ) -> Result<SlotSearch, BookingError> {
        let mut search = SlotSearch::default();
        tokio::time::sleep(self.settle).await;

        for &time in times {
            let cells = driver.query_all(&self.cells_for(time)).await?;

            if cells.is_empty() {
                info!("No slots available at {}", time);
                search.misses.push(TimeMiss {
                    time,
                    miss: SlotMiss::NoFreeSlots,
                });
                continue;
            }

            let available = cells.len();
            let mut skipped_here = 0;
            for cell in order.arrange(cells) {
                driver.click_element(&cell).await?;
                tokio::time::sleep(self.settle).await;

                let label = driver.text_content(&self.court_label).await?;
                let label = label.trim().to_string();
                let excluded = self.rule.is_excluded(&label);
                let candidate = SlotCandidate {
                    time,
                    court_label: label,
                    is_excluded: excluded,
                };

                if excluded {
                    warn!("Skipping {} slot at {}", candidate.court_label, time);
                    driver.click(&self.popup_close).await?;
                    tokio::time::sleep(self.settle).await;
                    search.skipped.push(candidate);
                    skipped_here += 1;
                    continue;
                }

                info!(
                    "Selected {} at {}, one of {} slots available",
                    candidate.court_label, time, available
                );
                search.chosen = Some(candidate);
                return Ok(search);
            }

            debug!("All {} slots at {} are on excluded courts", skipped_here, time);
            search.misses.push(TimeMiss {
                time,
                miss: SlotMiss::AllExcluded {
                    skipped: skipped_here,
                },
            });
        }

        Ok(search)
    }
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
