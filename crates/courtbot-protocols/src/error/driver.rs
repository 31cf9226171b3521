//! Page driver errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Option '{value}' not found in {selector}")]
    OptionNotFound { selector: String, value: String },

    #[error("Script error: {0}")]
    Script(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Browser not connected")]
    NotConnected,

    #[error("Driver failure: {0}")]
    Other(String),
}
