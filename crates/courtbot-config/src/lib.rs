//! # Courtbot Config
//!
//! Startup configuration: credentials and flags from the environment
//! ([`Settings`]) and the site description from TOML ([`SiteConfig`]).

mod error;
mod loader;
mod schema;
mod settings;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use settings::{Credentials, Settings};
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
