//! End-to-end booking attempt.

use std::sync::Arc;

use courtbot_config::SiteConfig;
use courtbot_protocols::{
    BookingOutcome, BookingRequest, Clock, PageDriver, ScanOrder, SlotCandidate, SystemClock,
};
use tracing::{error, info, warn};

use crate::committer::ReservationCommitter;
use crate::error::BookingError;
use crate::login::Login;
use crate::navigator::DateNavigator;
use crate::preference::resolve_order;
use crate::selector::SlotSelector;

/// Runs login, navigation, slot selection and commit in sequence.
///
/// The first failing stage ends the attempt; nothing is retried and no
/// compensating action is taken.
pub struct BookingOrchestrator {
    login: Option<Login>,
    navigator: DateNavigator,
    selector: SlotSelector,
    committer: ReservationCommitter,
    scan_order: ScanOrder,
    clock: Arc<dyn Clock>,
    force_dry_run: bool,
}

impl BookingOrchestrator {
    pub fn new(
        navigator: DateNavigator,
        selector: SlotSelector,
        committer: ReservationCommitter,
    ) -> Self {
        Self {
            login: None,
            navigator,
            selector,
            committer,
            scan_order: ScanOrder::default(),
            clock: Arc::new(SystemClock),
            force_dry_run: false,
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(
            DateNavigator::from_config(config),
            SlotSelector::from_config(config),
            ReservationCommitter::from_config(config),
        )
        .with_scan_order(config.booking.scan_order)
    }

    /// Log in before navigating. Without this the page is assumed to
    /// already hold an authenticated session.
    pub fn with_login(mut self, login: Login) -> Self {
        self.login = Some(login);
        self
    }

    /// Scan order used when the request does not name one.
    pub fn with_scan_order(mut self, order: ScanOrder) -> Self {
        self.scan_order = order;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Keep every attempt in dry-run mode regardless of the request.
    pub fn force_dry_run(mut self, force: bool) -> Self {
        self.force_dry_run = force;
        self
    }

    /// Run one attempt and fold the result into an outcome.
    pub async fn run_booking(
        &self,
        driver: &dyn PageDriver,
        request: &BookingRequest,
    ) -> BookingOutcome {
        match self.attempt(driver, request).await {
            Ok(slot) => BookingOutcome::success(slot),
            Err(e) => {
                let kind = e.kind();
                if kind.is_clean() {
                    warn!("Booking unsuccessful: {}", e);
                } else {
                    error!("Booking failed: {}", e);
                }
                BookingOutcome::failure(kind, e.to_string())
            }
        }
    }

    /// Run one attempt, surfacing the failing stage's error.
    pub async fn attempt(
        &self,
        driver: &dyn PageDriver,
        request: &BookingRequest,
    ) -> Result<SlotCandidate, BookingError> {
        // Reject bad opponents before touching the page.
        self.committer.opponent_id(&request.opponent)?;

        if let Some(login) = &self.login {
            login.run(driver).await?;
        }

        let today = self.clock.today();
        let date = self.navigator.navigate_to(driver, request, today).await?;

        let times = resolve_order(request);
        let order = request.scan_order.unwrap_or(self.scan_order);
        info!(
            "Searching {} for {} time(s), {:?} order",
            date,
            times.len(),
            order
        );

        let search = self.selector.select_slot(driver, &times, order).await?;
        let Some(slot) = search.chosen else {
            return Err(BookingError::NoSlotAvailable { times: times.len() });
        };

        let dry_run = self.force_dry_run || request.dry_run;
        let committed = self
            .committer
            .commit(driver, &request.opponent, dry_run)
            .await?;
        if !committed {
            return Err(BookingError::CommitFailed(
                "final confirmation did not appear".to_string(),
            ));
        }

        info!(
            "Booked {} at {} on {} against {}{}",
            slot.court_label,
            slot.time,
            date,
            request.opponent,
            if dry_run { " (dry run)" } else { "" }
        );
        Ok(slot)
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
