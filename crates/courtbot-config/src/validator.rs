//! Configuration validation.

use crate::schema::{SiteConfig, TIME_PLACEHOLDER};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Site configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &SiteConfig) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_site(config, &mut result);
        Self::validate_selectors(config, &mut result);
        Self::validate_booking(config, &mut result);
        Self::validate_timing(config, &mut result);
        Self::validate_export(config, &mut result);

        result
    }

    fn validate_site(config: &SiteConfig, result: &mut ValidationResult) {
        for (path, value) in [
            ("site.login_url", &config.site.login_url),
            ("site.reservations_url", &config.site.reservations_url),
        ] {
            match url::Url::parse(value) {
                Ok(u) if u.scheme() == "http" || u.scheme() == "https" => {}
                Ok(_) => result.add_error(ValidationError::new(
                    path,
                    "URL must use http:// or https://",
                )),
                Err(e) => result.add_error(ValidationError::new(path, format!("Invalid URL: {}", e))),
            }
        }

        if config.site.date_format.is_empty() {
            result.add_error(ValidationError::new("site.date_format", "Date format cannot be empty"));
        }
    }

    fn validate_selectors(config: &SiteConfig, result: &mut ValidationResult) {
        let s = &config.selectors;
        let all = [
            ("login_email", &s.login_email),
            ("login_password", &s.login_password),
            ("login_submit", &s.login_submit),
            ("logged_in_marker", &s.logged_in_marker),
            ("date_title", &s.date_title),
            ("next_day", &s.next_day),
            ("free_slot", &s.free_slot),
            ("court_label", &s.court_label),
            ("popup_close", &s.popup_close),
            ("opponent_select", &s.opponent_select),
            ("first_submit", &s.first_submit),
            ("final_submit", &s.final_submit),
            ("reservation_rows", &s.reservation_rows),
            ("reservation_headers", &s.reservation_headers),
            ("reservation_players", &s.reservation_players),
            ("reservation_detail_marker", &s.reservation_detail_marker),
            ("reservation_back", &s.reservation_back),
        ];

        for (name, value) in all {
            if value.trim().is_empty() {
                result.add_error(ValidationError::new(
                    format!("selectors.{}", name),
                    "Selector cannot be empty",
                ));
            }
        }

        if !s.free_slot.contains(TIME_PLACEHOLDER) {
            result.add_error(ValidationError::new(
                "selectors.free_slot",
                format!("Selector must contain the {} placeholder", TIME_PLACEHOLDER),
            ));
        }

        if !s.reservation_rows.starts_with("xpath=") {
            result.add_error(ValidationError::new(
                "selectors.reservation_rows",
                "Row selector must be an xpath= selector so rows can be indexed",
            ));
        }
    }

    fn validate_booking(config: &SiteConfig, result: &mut ValidationResult) {
        if config.booking.opponents.is_empty() {
            result.add_error(ValidationError::new(
                "booking.opponents",
                "At least one opponent must be configured",
            ));
        }

        for (name, id) in &config.booking.opponents {
            if id.trim().is_empty() {
                result.add_error(ValidationError::new(
                    format!("booking.opponents.{}", name),
                    "Player id cannot be empty",
                ));
            }
        }

        if config.booking.excluded_court_prefix.is_empty() {
            result.add_warning(ValidationWarning::new(
                "booking.excluded_court_prefix",
                "Empty prefix excludes every court",
            ));
        }

        if config.booking.max_navigation_steps == 0 {
            result.add_error(ValidationError::new(
                "booking.max_navigation_steps",
                "max_navigation_steps must be greater than 0",
            ));
        } else if config.booking.max_navigation_steps > 1000 {
            result.add_warning(ValidationWarning::new(
                "booking.max_navigation_steps",
                "max_navigation_steps is very high (>1000), a stuck page will take long to detect",
            ));
        }
    }

    fn validate_timing(config: &SiteConfig, result: &mut ValidationResult) {
        if config.timing.poll_attempts == 0 {
            result.add_error(ValidationError::new(
                "timing.poll_attempts",
                "poll_attempts must be greater than 0",
            ));
        }

        if config.timing.run_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "timing.run_timeout_secs",
                "run_timeout_secs must be greater than 0",
            ));
        }
    }

    fn validate_export(config: &SiteConfig, result: &mut ValidationResult) {
        if config.export.key_prefix.contains("..") {
            result.add_error(ValidationError::new(
                "export.key_prefix",
                "Key prefix cannot contain '..'",
            ));
        }

        if config.export.event_minutes == 0 {
            result.add_error(ValidationError::new(
                "export.event_minutes",
                "event_minutes must be greater than 0",
            ));
        }

        for player in &config.export.players {
            if player.trim().is_empty() {
                result.add_error(ValidationError::new(
                    "export.players",
                    "Player filter cannot be empty",
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
