use super::*;

#[test]
fn test_validate_default_config() {
    let config = SiteConfig::default();
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid(), "{:?}", result.errors);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_bad_url() {
    let mut config = SiteConfig::default();
    config.site.login_url = "not a url".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "site.login_url"));
}

#[test]
fn test_validate_non_http_url() {
    let mut config = SiteConfig::default();
    config.site.reservations_url = "ftp://example.org/future".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "site.reservations_url"));
}

#[test]
fn test_validate_empty_selector() {
    let mut config = SiteConfig::default();
    config.selectors.popup_close = "  ".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "selectors.popup_close"));
}

#[test]
fn test_validate_free_slot_placeholder() {
    let mut config = SiteConfig::default();
    config.selectors.free_slot = "td[type=\"free\"]".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "selectors.free_slot"));
}

#[test]
fn test_validate_rows_must_be_xpath() {
    let mut config = SiteConfig::default();
    config.selectors.reservation_rows = "tr.odd".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "selectors.reservation_rows"));
}

#[test]
fn test_validate_no_opponents() {
    let mut config = SiteConfig::default();
    config.booking.opponents.clear();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "booking.opponents"));
}

#[test]
fn test_validate_empty_player_id() {
    let mut config = SiteConfig::default();
    config.booking.opponents.insert("sam".to_string(), String::new());

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "booking.opponents.sam"));
}

#[test]
fn test_validate_empty_prefix_warning() {
    let mut config = SiteConfig::default();
    config.booking.excluded_court_prefix = String::new();

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "booking.excluded_court_prefix"));
}

#[test]
fn test_validate_navigation_bounds() {
    let mut config = SiteConfig::default();
    config.booking.max_navigation_steps = 0;
    assert!(!ConfigValidator::validate(&config).is_valid());

    config.booking.max_navigation_steps = 5000;
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(!result.warnings.is_empty());
}

#[test]
fn test_validate_timing() {
    let mut config = SiteConfig::default();
    config.timing.poll_attempts = 0;
    config.timing.run_timeout_secs = 0;

    let result = ConfigValidator::validate(&config);
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn test_validate_export() {
    let mut config = SiteConfig::default();
    config.export.key_prefix = "../outside".to_string();
    config.export.event_minutes = 0;
    config.export.players = vec![" ".to_string()];

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "export.key_prefix"));
    assert!(result.errors.iter().any(|e| e.path == "export.event_minutes"));
    assert!(result.errors.iter().any(|e| e.path == "export.players"));
}

#[test]
fn test_validation_result_methods() {
    let mut result = ValidationResult::default();
    assert!(result.is_valid());

    result.add_warning(ValidationWarning::new("a", "b"));
    assert!(result.is_valid());

    result.add_error(ValidationError::new("c", "d"));
    assert!(!result.is_valid());
}
