//! Site configuration schema.
//!
//! Every field has a default describing the squash club the bot was
//! written for, so an empty file (or no file) is a working configuration.

use serde::{Deserialize, Serialize};

mod schema_booking;
mod schema_export;
mod schema_site;

pub use schema_booking::*;
pub use schema_export::*;
pub use schema_site::*;

/// Root site configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteUrls,

    #[serde(default)]
    pub selectors: Selectors,

    #[serde(default)]
    pub columns: ColumnConfig,

    #[serde(default)]
    pub booking: BookingConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub browser: BrowserConfig,
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
