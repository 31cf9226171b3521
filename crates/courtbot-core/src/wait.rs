//! Bounded polling for elements that appear asynchronously.

use std::time::Duration;

use courtbot_protocols::{DriverError, PageDriver};
use tracing::trace;

/// Poll until `selector` matches at least one element.
///
/// Checks up to `attempts` times, sleeping `interval` between checks.
/// Returns whether the element showed up.
pub async fn wait_for_selector(
    driver: &dyn PageDriver,
    selector: &str,
    attempts: u32,
    interval: Duration,
) -> Result<bool, DriverError> {
    for attempt in 1..=attempts {
        if !driver.query_all(selector).await?.is_empty() {
            return Ok(true);
        }
        trace!("{} not present (check {}/{})", selector, attempt, attempts);
        if attempt < attempts {
            tokio::time::sleep(interval).await;
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeDriver;

    #[tokio::test]
    async fn test_present_immediately() {
        let driver = FakeDriver::new().with_elements("#ok", &["x"]);
        let found = wait_for_selector(&driver, "#ok", 3, Duration::ZERO).await.unwrap();
        assert!(found);
        assert_eq!(driver.queries_of("#ok"), 1);
    }

    #[tokio::test]
    async fn test_never_present() {
        let driver = FakeDriver::new();
        let found = wait_for_selector(&driver, "#missing", 4, Duration::ZERO).await.unwrap();
        assert!(!found);
        assert_eq!(driver.queries_of("#missing"), 4);
    }
}
