//! Merging scraped reservations with published history and writing
//! every export variant.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use courtbot_config::ExportConfig;
use courtbot_protocols::{BlobStore, CalendarRenderer, Clock, Reservation, SystemClock};
use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::error::SyncError;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Combine published history with freshly scraped reservations.
///
/// Previously published records dated before `today` are kept, since the
/// site no longer lists them. Fresh records are optionally restricted to
/// those with `player` among their players. The result lists history
/// first and holds each (date, start time, court) once.
pub fn merge_history(
    previous: Vec<Reservation>,
    fresh: &[Reservation],
    player: Option<&str>,
    today: NaiveDate,
) -> Vec<Reservation> {
    let past = previous.into_iter().filter(|r| r.date < today);
    let upcoming = fresh
        .iter()
        .filter(|r| player.is_none_or(|p| r.has_player(p)))
        .cloned();

    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for reservation in past.chain(upcoming) {
        let (date, time, court) = reservation.key();
        if seen.insert((date, time, court.to_string())) {
            merged.push(reservation);
        }
    }
    merged
}

/// One published calendar: everything, or one player's reservations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportVariant {
    pub player: Option<String>,
}

impl ExportVariant {
    pub fn all() -> Self {
        Self { player: None }
    }

    pub fn for_player(player: impl Into<String>) -> Self {
        Self {
            player: Some(player.into()),
        }
    }

    /// The unfiltered variant followed by one per configured player.
    ///
    /// Players that map onto the same storage keys (`Vera` and `vera`,
    /// `a b` and `a-b`) yield one variant, the first listed.
    pub fn from_config(config: &ExportConfig) -> Vec<Self> {
        dedup_by_stem(
            std::iter::once(Self::all())
                .chain(config.players.iter().map(Self::for_player))
                .collect(),
        )
    }

    fn stem(&self) -> String {
        match &self.player {
            None => "reservations".to_string(),
            Some(player) => format!("reservations-{}", key_safe(player)),
        }
    }

    pub fn history_key(&self, prefix: &str) -> String {
        join_key(prefix, &format!("{}.json", self.stem()))
    }

    pub fn calendar_key(&self, prefix: &str, extension: &str) -> String {
        join_key(prefix, &format!("{}.{}", self.stem(), extension))
    }
}

/// Drop variants whose keys an earlier variant already writes.
fn dedup_by_stem(variants: Vec<ExportVariant>) -> Vec<ExportVariant> {
    let mut seen = HashSet::new();
    variants
        .into_iter()
        .filter(|variant| {
            let fresh = seen.insert(variant.stem());
            if !fresh {
                warn!("Skipping export variant {:?}: keys already taken", variant.player);
            }
            fresh
        })
        .collect()
}

fn key_safe(player: &str) -> String {
    player
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect()
}

fn join_key(prefix: &str, name: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}

/// What one variant published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub variant: ExportVariant,
    pub history_key: String,
    pub calendar_key: String,
    pub kept_from_history: usize,
    pub total: usize,
}

/// Publishes reservation history and calendars to a blob store.
pub struct CalendarSync {
    store: Arc<dyn BlobStore>,
    renderer: Arc<dyn CalendarRenderer>,
    key_prefix: String,
    clock: Arc<dyn Clock>,
}

impl CalendarSync {
    pub fn new(
        store: Arc<dyn BlobStore>,
        renderer: Arc<dyn CalendarRenderer>,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            store,
            renderer,
            key_prefix: key_prefix.into(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Publish every variant concurrently. Each variant writes its own keys.
    pub async fn sync_calendars(
        &self,
        fresh: &[Reservation],
        variants: &[ExportVariant],
    ) -> Result<Vec<PublishReport>, SyncError> {
        let today = self.clock.today();
        let variants = dedup_by_stem(variants.to_vec());
        let reports = try_join_all(
            variants
                .iter()
                .map(|variant| self.publish(fresh, variant, today)),
        )
        .await?;
        info!("Published {} calendar variant(s)", reports.len());
        Ok(reports)
    }

    async fn publish(
        &self,
        fresh: &[Reservation],
        variant: &ExportVariant,
        today: NaiveDate,
    ) -> Result<PublishReport, SyncError> {
        let history_key = variant.history_key(&self.key_prefix);
        let calendar_key = variant.calendar_key(&self.key_prefix, self.renderer.extension());

        let previous = self.load_history(&history_key).await?;
        let previous_count = previous.len();
        let merged = merge_history(previous, fresh, variant.player.as_deref(), today);
        let kept_from_history = merged.iter().filter(|r| r.date < today).count();
        info!(
            "Combined {} previous and {} fresh reservations into {} for {}",
            previous_count,
            fresh.len(),
            merged.len(),
            history_key
        );

        let body = serde_json::to_vec_pretty(&merged)?;
        self.store
            .put(&history_key, body, JSON_CONTENT_TYPE)
            .await?;

        let calendar = self.renderer.render(&merged);
        self.store
            .put(
                &calendar_key,
                calendar.into_bytes(),
                self.renderer.content_type(),
            )
            .await?;
        debug!("Wrote {} and {}", history_key, calendar_key);

        Ok(PublishReport {
            variant: variant.clone(),
            history_key,
            calendar_key,
            kept_from_history,
            total: merged.len(),
        })
    }

    async fn load_history(&self, key: &str) -> Result<Vec<Reservation>, SyncError> {
        let Some(bytes) = self.store.get(key).await? else {
            debug!("No history at {}, starting empty", key);
            return Ok(Vec::new());
        };
        serde_json::from_slice(&bytes).map_err(|source| SyncError::CorruptHistory {
            key: key.to_string(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
