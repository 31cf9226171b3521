//! `sync-calendar` subcommand.

use std::sync::Arc;

use tracing::info;

use courtbot_config::{Settings, SiteConfig};
use courtbot_core::{CalendarSync, ExportVariant, Login, ReservationScraper};
use courtbot_export_fs::{FsBlobStore, IcsRenderer};
use courtbot_protocols::PageDriver;

/// Log in, read the upcoming reservations and publish every variant.
pub(crate) async fn run_sync(
    driver: &dyn PageDriver,
    config: &SiteConfig,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    Login::from_config(config, settings.credentials.clone())
        .run(driver)
        .await?;

    let reservations = ReservationScraper::from_config(config)
        .fetch_reservations(driver)
        .await?;
    info!("Fetched {} upcoming reservation(s)", reservations.len());

    let export = &config.export;
    let store = FsBlobStore::new(&export.store_dir).await?;
    let sync = CalendarSync::new(
        Arc::new(store),
        Arc::new(IcsRenderer::from_config(export)),
        export.key_prefix.clone(),
    );

    let reports = sync
        .sync_calendars(&reservations, &ExportVariant::from_config(export))
        .await?;
    for report in &reports {
        info!(
            "{} -> {} ({} event(s), {} from history)",
            report.history_key, report.calendar_key, report.total, report.kept_from_history
        );
    }
    Ok(())
}
