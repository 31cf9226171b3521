//! Configuration loader.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::SiteConfig;

/// Site configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<SiteConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a file if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<SiteConfig, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(SiteConfig::default()),
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<SiteConfig, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let mut config: SiteConfig = toml::from_str(&expanded)?;
        config.export.store_dir = Self::expand_path(&config.export.store_dir.to_string_lossy()).into();
        if let Some(dir) = config.browser.profile_dir.take() {
            config.browser.profile_dir = Some(Self::expand_path(&dir.to_string_lossy()).into());
        }
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConfigError::InvalidValue {
            field: "env pattern".to_string(),
            message: e.to_string(),
        })?;

        let mut result = content.to_string();
        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.courtbot`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.booking.max_navigation_steps, 400);
        assert_eq!(config.timing.poll_attempts, 20);
    }

    #[test]
    fn test_load_partial_config() {
        let content = r#"
            [site]
            login_url = "https://club.example.org/"

            [booking]
            excluded_court_prefix = "baan 9 "
            scan_order = "forward"

            [booking.opponents]
            sam = "77"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.site.login_url, "https://club.example.org/");
        assert_eq!(config.booking.excluded_court_prefix, "baan 9 ");
        assert_eq!(config.booking.opponents.get("sam").map(String::as_str), Some("77"));
        assert!(!config.booking.opponents.contains_key("vera"));
        // Untouched sections keep their defaults
        assert_eq!(config.selectors.date_title, "#matrix_date_title");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[timing]").unwrap();
        writeln!(file, "settle_ms = 250").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.timing.settle_ms, 250);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/courtbot.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = ConfigLoader::load_or_default(None).unwrap();
        assert_eq!(config.export.key_prefix, "calendar");
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${NONEXISTENT_COURTBOT_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_env_vars_no_vars() {
        let content = "value = \"no variables here\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, content);
    }

    #[test]
    fn test_store_dir_tilde_expanded() {
        let content = r#"
            [export]
            store_dir = "~/courtbot-exports"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        let dir = config.export.store_dir.to_string_lossy().to_string();
        assert!(!dir.starts_with('~'));
        assert!(dir.ends_with("courtbot-exports"));
    }

    #[test]
    fn test_sample_config() {
        let config = ConfigLoader::load_str(include_str!("../../../config/courtbot.toml")).unwrap();
        assert_eq!(config.booking.opponents["koen"], "1340920");
        assert_eq!(config.timing.poll_attempts, 20);
        assert!(crate::ConfigValidator::validate(&config).is_valid());
    }
}
