//! CDP error types.

use courtbot_protocols::DriverError;
use thiserror::Error;

/// CDP client errors.
#[derive(Debug, Error)]
pub enum CdpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Nothing answers on the debugging endpoint.
    #[error("Chrome not available at {0}. Start Chrome with: chrome --remote-debugging-port=9222")]
    ChromeNotAvailable(String),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error during endpoint discovery.
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Session closed")]
    SessionClosed,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::WebSocket(e.to_string())
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Http(e.to_string())
    }
}

impl From<url::ParseError> for CdpError {
    fn from(e: url::ParseError) -> Self {
        CdpError::ConnectionFailed(format!("Invalid URL: {}", e))
    }
}

impl From<CdpError> for DriverError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::NavigationFailed(msg) => DriverError::Navigation(msg),
            CdpError::JavaScript(msg) => DriverError::Script(msg),
            CdpError::Timeout(msg) => DriverError::Timeout(msg),
            CdpError::SessionClosed => DriverError::NotConnected,
            other => DriverError::Other(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_display() {
        let err = CdpError::Protocol {
            code: -32000,
            message: "No node with given id".to_string(),
        };
        assert_eq!(err.to_string(), "CDP error: No node with given id (code: -32000)");
    }

    #[test]
    fn test_into_driver_error() {
        assert!(matches!(
            DriverError::from(CdpError::NavigationFailed("net::ERR".into())),
            DriverError::Navigation(_)
        ));
        assert!(matches!(
            DriverError::from(CdpError::Timeout("Page load timeout".into())),
            DriverError::Timeout(_)
        ));
        assert!(matches!(
            DriverError::from(CdpError::SessionClosed),
            DriverError::NotConnected
        ));
        assert!(matches!(
            DriverError::from(CdpError::WebSocket("reset".into())),
            DriverError::Other(msg) if msg.contains("reset")
        ));
    }

    #[test]
    fn test_url_parse_error() {
        let err: CdpError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, CdpError::ConnectionFailed(msg) if msg.starts_with("Invalid URL")));
    }
}
