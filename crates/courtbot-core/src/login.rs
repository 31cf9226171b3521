//! Account login.

use std::time::Duration;

use courtbot_config::{Credentials, SiteConfig};
use courtbot_protocols::PageDriver;
use tracing::{info, warn};

use crate::error::BookingError;
use crate::wait::wait_for_selector;

/// Signs in through the site's login form.
#[derive(Debug, Clone)]
pub struct Login {
    url: String,
    email_field: String,
    password_field: String,
    submit: String,
    logged_in_marker: String,
    credentials: Credentials,
    poll_attempts: u32,
    poll_interval: Duration,
}

impl Login {
    pub fn from_config(config: &SiteConfig, credentials: Credentials) -> Self {
        let selectors = &config.selectors;
        Self {
            url: config.site.login_url.clone(),
            email_field: selectors.login_email.clone(),
            password_field: selectors.login_password.clone(),
            submit: selectors.login_submit.clone(),
            logged_in_marker: selectors.logged_in_marker.clone(),
            credentials,
            poll_attempts: config.timing.poll_attempts,
            poll_interval: config.timing.poll_interval(),
        }
    }

    pub fn with_polling(mut self, attempts: u32, interval: Duration) -> Self {
        self.poll_attempts = attempts;
        self.poll_interval = interval;
        self
    }

    /// Log in and wait for the logged-in marker.
    pub async fn run(&self, driver: &dyn PageDriver) -> Result<(), BookingError> {
        info!("Logging in as {}", self.credentials.username);
        driver.navigate(&self.url).await?;
        driver
            .fill(&self.email_field, &self.credentials.username)
            .await?;
        driver
            .fill(&self.password_field, &self.credentials.password)
            .await?;
        driver.click(&self.submit).await?;

        let logged_in = wait_for_selector(
            driver,
            &self.logged_in_marker,
            self.poll_attempts,
            self.poll_interval,
        )
        .await?;

        if !logged_in {
            warn!("Still not logged in after {} checks", self.poll_attempts);
            return Err(BookingError::LoginFailed {
                attempts: self.poll_attempts,
            });
        }
        info!("Logged in");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Action, FakeDriver};

    fn credentials() -> Credentials {
        Credentials {
            username: "player@example.com".to_string(),
            password: "hunter2".to_string(),
        }
    }

    fn login(config: &SiteConfig) -> Login {
        Login::from_config(config, credentials()).with_polling(4, Duration::ZERO)
    }

    fn login_form(config: &SiteConfig) -> FakeDriver {
        let s = &config.selectors;
        FakeDriver::new()
            .with_field(&s.login_email)
            .with_field(&s.login_password)
            .with_clickable(&s.login_submit)
    }

    #[tokio::test]
    async fn test_login_succeeds() {
        let config = SiteConfig::default();
        let s = &config.selectors;
        let driver = login_form(&config).on_click_show(&s.login_submit, &s.logged_in_marker, &["Uitloggen"]);

        login(&config).run(&driver).await.unwrap();

        assert_eq!(
            driver.actions(),
            vec![
                Action::Navigate(config.site.login_url.clone()),
                Action::Fill {
                    selector: s.login_email.clone(),
                    value: "player@example.com".to_string(),
                },
                Action::Fill {
                    selector: s.login_password.clone(),
                    value: "hunter2".to_string(),
                },
                Action::Click(s.login_submit.clone()),
            ]
        );
        assert_eq!(driver.queries_of(&s.logged_in_marker), 1);
    }

    #[tokio::test]
    async fn test_login_times_out() {
        let config = SiteConfig::default();
        let driver = login_form(&config);

        let err = login(&config).run(&driver).await.unwrap_err();

        assert!(matches!(err, BookingError::LoginFailed { attempts: 4 }));
        assert_eq!(driver.queries_of(&config.selectors.logged_in_marker), 4);
    }

    #[tokio::test]
    async fn test_missing_form_is_driver_error() {
        let config = SiteConfig::default();
        let driver = FakeDriver::new();

        let err = login(&config).run(&driver).await.unwrap_err();
        assert!(matches!(err, BookingError::Driver(_)));
    }

    #[test]
    fn test_debug_hides_password() {
        let config = SiteConfig::default();
        let rendered = format!("{:?}", login(&config));
        assert!(!rendered.contains("hunter2"));
    }
}
