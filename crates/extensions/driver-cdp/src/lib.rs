//! Chrome DevTools Protocol page driver for courtbot.
//!
//! ```text
//! ┌─────────────────┐    WebSocket     ┌──────────────────┐
//! │    CdpDriver    │ ◄──────────────► │  Chrome/Chromium │
//! │  (PageDriver)   │       CDP        │  (one tab)       │
//! └─────────────────┘                  └──────────────────┘
//! ```
//!
//! [`CdpDriver::launch`] reuses a Chrome already listening on the debug
//! port or starts one (headless unless configured otherwise) with a
//! persistent profile, then opens a fresh tab.
//!
//! Selectors are resolved in page JavaScript on every call, which keeps
//! [`ElementHandle`](courtbot_protocols::ElementHandle)s positional. Clicks
//! scroll the element into view and dispatch real mouse events at its
//! centre, so the site's own handlers run as for a user.

pub mod cdp;
mod driver;
mod launcher;
mod script;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use driver::CdpDriver;
pub use launcher::{BrowserLauncher, LaunchConfig, LaunchError};
