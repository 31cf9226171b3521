//! Process-level settings read from the environment.

use std::fmt;

use crate::error::ConfigError;

pub const ENV_USERNAME: &str = "COURTBOT_USERNAME";
pub const ENV_PASSWORD: &str = "COURTBOT_PASSWORD";
pub const ENV_HEADLESS: &str = "COURTBOT_HEADLESS";
pub const ENV_DRY_RUN: &str = "COURTBOT_DRY_RUN";

/// Account credentials. `Debug` never prints the password.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Startup settings, validated eagerly.
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Credentials,
    pub headless: bool,
    /// Process-wide dry-run switch; a run is live only if this and the
    /// request both say so.
    pub dry_run: bool,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::EnvVarNotSet(key.to_string()))
        };

        let credentials = Credentials {
            username: required(ENV_USERNAME)?,
            password: required(ENV_PASSWORD)?,
        };

        let headless = parse_flag(ENV_HEADLESS, lookup(ENV_HEADLESS), true)?;
        let dry_run = parse_flag(ENV_DRY_RUN, lookup(ENV_DRY_RUN), true)?;

        Ok(Self {
            credentials,
            headless,
            dry_run,
        })
    }
}

fn parse_flag(key: &str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.trim().to_lowercase().as_str() {
        "" => Ok(default),
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            field: key.to_string(),
            message: format!("expected a boolean, got '{}'", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_minimal_settings_use_defaults() {
        let settings =
            Settings::from_lookup(lookup(&[(ENV_USERNAME, "me@example.com"), (ENV_PASSWORD, "pw")]))
                .unwrap();
        assert_eq!(settings.credentials.username, "me@example.com");
        assert!(settings.headless);
        assert!(settings.dry_run);
    }

    #[test]
    fn test_missing_username_fails() {
        let result = Settings::from_lookup(lookup(&[(ENV_PASSWORD, "pw")]));
        match result {
            Err(ConfigError::EnvVarNotSet(key)) => assert_eq!(key, ENV_USERNAME),
            other => panic!("Expected EnvVarNotSet, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_password_fails() {
        let result = Settings::from_lookup(lookup(&[(ENV_USERNAME, "me"), (ENV_PASSWORD, "  ")]));
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_flags_parsed() {
        let settings = Settings::from_lookup(lookup(&[
            (ENV_USERNAME, "me"),
            (ENV_PASSWORD, "pw"),
            (ENV_HEADLESS, "false"),
            (ENV_DRY_RUN, "0"),
        ]))
        .unwrap();
        assert!(!settings.headless);
        assert!(!settings.dry_run);
    }

    #[test]
    fn test_invalid_flag_rejected() {
        let result = Settings::from_lookup(lookup(&[
            (ENV_USERNAME, "me"),
            (ENV_PASSWORD, "pw"),
            (ENV_DRY_RUN, "maybe"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_debug_redacts_password() {
        let credentials = Credentials {
            username: "me".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("me"));
        assert!(!debug.contains("hunter2"));
    }
}
