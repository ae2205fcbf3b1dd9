// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses database URL, catalog path, default interval, and environment mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use crate::constants::{defaults, env_vars};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            // Default fallback for unrecognized values
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Complete runtime configuration of the coach
#[derive(Debug, Clone)]
pub struct CoachConfig {
    /// SQLite connection string
    pub database_url: String,
    /// Path of the JSON exercise catalog
    pub catalog_path: PathBuf,
    /// Challenge interval assigned to newly registered users
    pub default_interval_minutes: u32,
    /// Deployment environment
    pub environment: Environment,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            database_url: defaults::DATABASE_URL.to_owned(),
            catalog_path: PathBuf::from(defaults::CATALOG_PATH),
            default_interval_minutes: defaults::INTERVAL_MINUTES,
            environment: Environment::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl CoachConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::ConfigInvalid` if `DEFAULT_INTERVAL_MINUTES` is not a
    /// positive integer
    pub fn from_env() -> AppResult<Self> {
        let default_interval_minutes = parse_interval(
            &env_var_or(
                env_vars::DEFAULT_INTERVAL_MINUTES,
                &defaults::INTERVAL_MINUTES.to_string(),
            ),
        )?;

        let config = Self {
            database_url: env_var_or(env_vars::DATABASE_URL, defaults::DATABASE_URL),
            catalog_path: PathBuf::from(env_var_or(env_vars::CATALOG_PATH, defaults::CATALOG_PATH)),
            default_interval_minutes,
            environment: Environment::from_str_or_default(&env_var_or(
                env_vars::ENVIRONMENT,
                "development",
            )),
            logging: LoggingConfig::from_env(),
        };
        Ok(config)
    }

    /// Override the database URL
    #[must_use]
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = url.into();
        self
    }

    /// Override the catalog path
    #[must_use]
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = path.into();
        self
    }

    /// Log a one-line summary of the effective configuration
    pub fn log_summary(&self) {
        info!(
            environment = %self.environment,
            database.url = %self.database_url,
            catalog.path = %self.catalog_path.display(),
            default_interval_minutes = self.default_interval_minutes,
            "Configuration loaded"
        );
    }
}

/// Parse a challenge interval in minutes
///
/// # Errors
///
/// Returns `ErrorCode::ConfigInvalid` unless `value` is an integer greater than zero
pub fn parse_interval(value: &str) -> AppResult<u32> {
    match value.trim().parse::<u32>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(AppError::new(
            ErrorCode::ConfigInvalid,
            format!("{} must be a positive integer, got '{value}'", env_vars::DEFAULT_INTERVAL_MINUTES),
        )),
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_interval() {
        assert_eq!(parse_interval("45").unwrap(), 45);
        assert_eq!(parse_interval(" 90 ").unwrap(), 90);
        assert!(parse_interval("0").is_err());
        assert!(parse_interval("-5").is_err());
        assert!(parse_interval("hourly").is_err());
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(Environment::from_str_or_default("prod"), Environment::Production);
        assert_eq!(Environment::from_str_or_default("TEST"), Environment::Testing);
        assert_eq!(Environment::from_str_or_default("staging"), Environment::Development);
    }
}
