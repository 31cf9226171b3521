//! Page driver capability.
//!
//! The booking core never touches a browser directly. It is handed one
//! [`PageDriver`] per attempt and serialises every call through it: each
//! call is a suspension point that completes before the next is issued.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DriverError;

/// Reference to the `index`-th element matched by `selector`.
///
/// Handles are positional rather than tied to a live DOM node, so they stay
/// meaningful after the page re-renders as long as the listing order holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle {
    pub selector: String,
    pub index: usize,
}

impl ElementHandle {
    pub fn new(selector: impl Into<String>, index: usize) -> Self {
        Self {
            selector: selector.into(),
            index,
        }
    }
}

/// Capability surface of a single browser page.
///
/// Selectors are CSS unless prefixed with `xpath=`.
/// Implementations are not required to be safe for concurrent use; callers
/// must keep one logical flow per driver.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Load `url` and wait until the document is usable.
    async fn navigate(&self, url: &str) -> Result<(), DriverError>;

    /// Replace the value of the first input matching `selector`.
    async fn fill(&self, selector: &str, value: &str) -> Result<(), DriverError>;

    /// Click the first element matching `selector`.
    async fn click(&self, selector: &str) -> Result<(), DriverError>;

    /// Click a previously queried element.
    async fn click_element(&self, element: &ElementHandle) -> Result<(), DriverError>;

    /// All elements currently matching `selector`, in document order.
    async fn query_all(&self, selector: &str) -> Result<Vec<ElementHandle>, DriverError>;

    /// Text content of the first element matching `selector`.
    async fn text_content(&self, selector: &str) -> Result<String, DriverError>;

    /// Text content of a previously queried element.
    async fn element_text(&self, element: &ElementHandle) -> Result<String, DriverError>;

    /// Choose the option with `value` in the `<select>` matching `selector`.
    async fn select_option(&self, selector: &str, value: &str) -> Result<(), DriverError>;

    /// URL of the currently loaded document.
    async fn current_url(&self) -> Result<String, DriverError>;

    /// Release the page. The default does nothing.
    async fn close(&self) -> Result<(), DriverError> {
        Ok(())
    }
}
