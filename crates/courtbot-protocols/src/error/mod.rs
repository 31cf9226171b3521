//! Error types for the courtbot protocol layer.

mod driver;
mod store;

pub use driver::*;
pub use store::*;
