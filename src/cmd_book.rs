//! `book` subcommand.

use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use courtbot_config::{Settings, SiteConfig};
use courtbot_core::{BookingOrchestrator, Login};
use courtbot_protocols::{BookingOutcome, BookingRequest, FailureKind, PageDriver};

/// Exit code for a clean "nothing free" outcome.
pub(crate) const EXIT_NO_SLOT: i32 = 2;

/// Command-line overrides applied on top of the request file.
#[derive(Debug, Default)]
pub(crate) struct RequestOverrides {
    pub date: Option<NaiveDate>,
    pub opponent: Option<String>,
    pub live: bool,
}

/// Read the request file (or take the defaults) and apply overrides.
pub(crate) fn build_request(
    path: Option<&Path>,
    overrides: RequestOverrides,
) -> Result<BookingRequest, Box<dyn std::error::Error>> {
    let mut request = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p)?;
            serde_json::from_str(&content)?
        }
        None => BookingRequest::default(),
    };
    apply_overrides(&mut request, overrides);
    Ok(request)
}

fn apply_overrides(request: &mut BookingRequest, overrides: RequestOverrides) {
    if let Some(date) = overrides.date {
        request.target_date = Some(date);
    }
    if let Some(opponent) = overrides.opponent {
        request.opponent = opponent;
    }
    if overrides.live {
        request.dry_run = false;
    }
}

/// Run one attempt against an open page.
pub(crate) async fn run_book(
    driver: &dyn PageDriver,
    config: &SiteConfig,
    settings: &Settings,
    request: &BookingRequest,
) -> BookingOutcome {
    info!(
        "Booking against {} (request dry_run={}, process dry_run={})",
        request.opponent, request.dry_run, settings.dry_run
    );
    let orchestrator = BookingOrchestrator::from_config(config)
        .with_login(Login::from_config(config, settings.credentials.clone()))
        .force_dry_run(settings.dry_run);
    orchestrator.run_booking(driver, request).await
}

pub(crate) fn exit_code(outcome: &BookingOutcome) -> i32 {
    match outcome.failure_reason {
        None if outcome.succeeded => 0,
        Some(FailureKind::NoSlotAvailable) => EXIT_NO_SLOT,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtbot_protocols::SlotCandidate;

    #[test]
    fn test_overrides_replace_request_fields() {
        let mut request = BookingRequest::default();
        let date = NaiveDate::from_ymd_opt(2026, 10, 23).unwrap();
        apply_overrides(
            &mut request,
            RequestOverrides {
                date: Some(date),
                opponent: Some("koen".to_string()),
                live: true,
            },
        );
        assert_eq!(request.target_date, Some(date));
        assert_eq!(request.opponent, "koen");
        assert!(!request.dry_run);
    }

    #[test]
    fn test_no_overrides_keep_dry_run() {
        let request = build_request(None, RequestOverrides::default()).unwrap();
        assert!(request.dry_run);
        assert_eq!(request, BookingRequest::default());
    }

    #[test]
    fn test_request_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(&path, r#"{"opponent": "koen", "dry_run": false}"#).unwrap();

        let request = build_request(Some(&path), RequestOverrides::default()).unwrap();
        assert_eq!(request.opponent, "koen");
        assert!(!request.dry_run);
    }

    #[test]
    fn test_bad_request_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(&path, r#"{"oponent": "koen"}"#).unwrap();
        assert!(build_request(Some(&path), RequestOverrides::default()).is_err());
    }

    #[test]
    fn test_exit_codes() {
        let slot = SlotCandidate {
            time: "20:30".parse().unwrap(),
            court_label: "Court 4".to_string(),
            is_excluded: false,
        };
        assert_eq!(exit_code(&BookingOutcome::success(slot)), 0);
        assert_eq!(
            exit_code(&BookingOutcome::failure(FailureKind::NoSlotAvailable, "none")),
            EXIT_NO_SLOT
        );
        assert_eq!(
            exit_code(&BookingOutcome::failure(FailureKind::CommitFailed, "gone")),
            1
        );
    }
}
