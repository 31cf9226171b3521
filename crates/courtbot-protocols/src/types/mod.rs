//! Core domain types.

mod outcome;
mod request;
mod reservation;
mod time;

pub use outcome::*;
pub use request::*;
pub use reservation::*;
pub use time::*;
