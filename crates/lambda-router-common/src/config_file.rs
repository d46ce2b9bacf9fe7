//! Configuration file structures for lambda-router.
//!
//! This module defines structures for TOML configuration files:
//! - [`ConfigFile`]: Top-level configuration file structure
//! - [`LoggingConfig`]: Log filter and output format for the invoke binary

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::CorsConfig;

/// Top-level configuration file structure.
///
/// # Example
///
/// ```toml
/// [cors]
/// origins = ["https://example.com"]
/// methods = ["GET", "POST"]
/// headers = ["Content-Type", "Authorization"]
///
/// [logging]
/// filter = "info,lambda_router=debug"
/// json = false
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    /// CORS policy. Every list defaults to the wildcard.
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigFile {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigFileError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigFileError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let config = Self::from_toml(&content)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    ///
    /// Allow-lists are validated while parsing, so an empty list or a `*`
    /// mixed with other entries is a parse error.
    pub fn from_toml(content: &str) -> Result<Self, ConfigFileError> {
        toml::from_str(content).map_err(|e| ConfigFileError::Parse {
            message: e.to_string(),
        })
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is not set.
    #[serde(default = "defaults::log_filter")]
    pub filter: String,

    /// Emit logs as JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: defaults::log_filter(),
            json: false,
        }
    }
}

/// Configuration file errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("Failed to parse config file: {message}")]
    Parse { message: String },
}

/// Default value functions for serde.
mod defaults {
    pub fn log_filter() -> String {
        "info,lambda_router=debug".to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::AllowList;

    use super::*;

    #[test]
    fn test_default_config_file() {
        let config = ConfigFile::default();

        assert!(config.cors.origins.is_any());
        assert!(config.cors.methods.is_any());
        assert!(config.cors.headers.is_any());
        assert_eq!(config.logging.filter, "info,lambda_router=debug");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = ConfigFile::from_toml("").unwrap();
        assert!(config.cors.origins.is_any());
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
            [cors]
            origins = ["https://example.com"]
        "#;

        let config = ConfigFile::from_toml(toml).unwrap();

        assert_eq!(
            config.cors.origins,
            AllowList::List(vec!["https://example.com".to_string()])
        );
        // Defaults applied
        assert!(config.cors.methods.is_any());
        assert_eq!(config.logging.filter, "info,lambda_router=debug");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [cors]
            origins = ["https://example.com", "https://app.example.com"]
            methods = ["GET", "POST"]
            headers = ["*"]

            [logging]
            filter = "warn"
            json = true
        "#;

        let config = ConfigFile::from_toml(toml).unwrap();

        assert!(config.cors.origins.allows("https://app.example.com"));
        assert_eq!(config.cors.methods.header_value(), "GET, POST");
        assert!(config.cors.headers.is_any());
        assert_eq!(config.logging.filter, "warn");
        assert!(config.logging.json);
    }

    #[test]
    fn test_parse_rejects_mixed_wildcard() {
        let toml = r#"
            [cors]
            origins = ["*", "https://example.com"]
        "#;

        let err = ConfigFile::from_toml(toml).unwrap_err();
        assert!(matches!(err, ConfigFileError::Parse { .. }));
    }

    #[test]
    fn test_parse_invalid_toml() {
        let invalid = "this is not valid toml [";
        let result = ConfigFile::from_toml(invalid);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = ConfigFile::from_file("/nonexistent/lambda-router.toml").unwrap_err();
        assert!(matches!(err, ConfigFileError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/lambda-router.toml"));
    }
}
