use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project config file read from the working directory.
pub const CONFIG_FILE: &str = "earthpicture.yaml";

/// Prefix for environment overrides, e.g. `EARTHPICTURE_HUB__PAGE_SIZE`.
pub const ENV_PREFIX: &str = "EARTHPICTURE_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Credentials path cannot be empty")]
    EmptyCredentialsPath,

    #[error("Invalid hub base_url: {0}. Must start with http:// or https://")]
    InvalidBaseUrl(String),

    #[error("Invalid page_size: {0}. Must be between 1 and 100")]
    InvalidPageSize(u32),

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. earthpicture.yaml in the working directory (optional)
    /// 3. Environment variables (EARTHPICTURE_* prefix)
    pub fn load() -> Result<Config> {
        Self::load_with(Yaml::file(CONFIG_FILE))
    }

    /// Same as [`load`](Self::load) but reads the given file instead of
    /// `earthpicture.yaml`. Environment variables still win.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file {} does not exist", path.display());
        }
        Self::load_with(Yaml::file(path))
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    fn load_with(file: figment::providers::Data<Yaml>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(file)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.credentials_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyCredentialsPath);
        }

        let base_url = &config.hub.base_url;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url.clone()));
        }

        if config.hub.page_size == 0 || config.hub.page_size > 100 {
            return Err(ConfigError::InvalidPageSize(config.hub.page_size));
        }

        if config.hub.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.hub.timeout_secs));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::config::{LogFormat, RotationPolicy};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.credentials_path, Path::new("credentials_config.json"));
        assert_eq!(config.hub.base_url, "https://scihub.copernicus.eu/dhus");
        assert_eq!(config.hub.page_size, 100);
        assert_eq!(config.logging.level, "warn");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
credentials_path: /etc/earthpicture/creds.json
hub:
  base_url: http://localhost:8080/dhus
  page_size: 50
logging:
  level: debug
  format: json
  rotation: never
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(
            config.credentials_path,
            Path::new("/etc/earthpicture/creds.json")
        );
        assert_eq!(config.hub.base_url, "http://localhost:8080/dhus");
        assert_eq!(config.hub.page_size, 50);
        assert_eq!(config.hub.timeout_secs, 60);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.rotation, RotationPolicy::Never);

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_page_size() {
        let mut config = Config::default();
        config.hub.page_size = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidPageSize(0))
        ));

        config.hub.page_size = 101;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidPageSize(101))
        ));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_base_url_and_timeout() {
        let mut config = Config::default();
        config.hub.base_url = "ftp://example.com".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBaseUrl(_))
        ));

        let mut config = Config::default();
        config.hub.timeout_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTimeout(0))
        ));
    }

    #[test]
    fn test_validate_empty_credentials_path() {
        let mut config = Config::default();
        config.credentials_path = std::path::PathBuf::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyCredentialsPath)
        ));
    }

    #[test]
    fn test_load_from_file_with_env_override() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "hub:\n  page_size: 25\n  base_url: http://localhost:9000\nlogging:\n  level: info"
        )
        .unwrap();
        file.flush().unwrap();

        let config = temp_env::with_vars(
            [
                ("EARTHPICTURE_HUB__PAGE_SIZE", Some("10")),
                ("EARTHPICTURE_CREDENTIALS_PATH", Some("/tmp/creds.json")),
            ],
            || ConfigLoader::load_from_file(file.path()).unwrap(),
        );

        assert_eq!(config.hub.page_size, 10, "Env should win over the file");
        assert_eq!(config.hub.base_url, "http://localhost:9000");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.credentials_path, Path::new("/tmp/creds.json"));
    }

    #[test]
    fn test_load_from_missing_file() {
        assert!(ConfigLoader::load_from_file("/nonexistent/earthpicture.yaml").is_err());
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "hub:\n  page_size: 500").unwrap();
        file.flush().unwrap();

        let result = temp_env::with_vars_unset(["EARTHPICTURE_HUB__PAGE_SIZE"], || {
            ConfigLoader::load_from_file(file.path())
        });
        assert!(result.is_err());
    }
}
