//! Common types, errors, and configuration for lambda-router.
//!
//! This crate provides shared functionality used across the lambda-router workspace:
//! - Error types using `thiserror` for registration, configuration and handler failures
//! - CORS policy configuration ([`CorsConfig`], [`AllowList`])
//! - The TOML configuration file format ([`ConfigFile`])

pub mod config;
pub mod config_file;
pub mod error;

pub use config::{AllowList, CorsConfig};
pub use config_file::{ConfigFile, ConfigFileError, LoggingConfig};
pub use error::{HandlerError, RouterError};
