//! Local publishing targets for reservation exports.
//!
//! - [`FsBlobStore`] - keys map to files below a root directory
//! - [`IcsRenderer`] - RFC 5545 calendar with one event per reservation

mod ics;
mod store;

pub use ics::IcsRenderer;
pub use store::FsBlobStore;
