//! Configuration module for credo.
//!
//! The crate never reads its configuration implicitly; the host loads a
//! [`Config`] (from a TOML file, with optional environment overrides for
//! secrets) and hands the relevant section to each component at startup.

use serde::Deserialize;
use std::path::Path;

use crate::{CredoError, Result};

/// Minimum accepted bcrypt cost factor.
pub const MIN_HASH_COST: u32 = 4;

/// Maximum accepted bcrypt cost factor.
pub const MAX_HASH_COST: u32 = 31;

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/credo.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Credential and token lifecycle configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// bcrypt cost factor for password hashing.
    ///
    /// Applies to newly created hashes only; stored hashes embed their own
    /// cost and stay verifiable after this value changes.
    #[serde(default = "default_hash_cost")]
    pub hash_cost: u32,
    /// Secret for signing access tokens. Required.
    #[serde(default)]
    pub access_token_secret: String,
    /// Access token lifetime as a duration string (e.g. "15m").
    #[serde(default = "default_access_token_expires")]
    pub access_token_expires: String,
    /// Secret for signing refresh tokens. Required, must differ from the
    /// access token secret.
    #[serde(default)]
    pub refresh_token_secret: String,
    /// Refresh token lifetime as a duration string (e.g. "7d").
    #[serde(default = "default_refresh_token_expires")]
    pub refresh_token_expires: String,
    /// Password-reset token lifetime as a duration string (e.g. "1h").
    #[serde(default = "default_reset_token_expires")]
    pub reset_token_expires: String,
}

fn default_hash_cost() -> u32 {
    10
}

fn default_access_token_expires() -> String {
    "15m".to_string()
}

fn default_refresh_token_expires() -> String {
    "7d".to_string()
}

fn default_reset_token_expires() -> String {
    "1h".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            hash_cost: default_hash_cost(),
            access_token_secret: String::new(),
            access_token_expires: default_access_token_expires(),
            refresh_token_secret: String::new(),
            refresh_token_expires: default_refresh_token_expires(),
            reset_token_expires: default_reset_token_expires(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file path; console-only when unset.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Credential lifecycle settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(CredoError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| CredoError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides.
    ///
    /// Supported variables:
    /// - `CREDO_ACCESS_TOKEN_SECRET`
    /// - `CREDO_REFRESH_TOKEN_SECRET`
    pub fn apply_env_overrides(&mut self) {
        if let Ok(secret) = std::env::var("CREDO_ACCESS_TOKEN_SECRET") {
            if !secret.is_empty() {
                self.auth.access_token_secret = secret;
            }
        }
        if let Ok(secret) = std::env::var("CREDO_REFRESH_TOKEN_SECRET") {
            if !secret.is_empty() {
                self.auth.refresh_token_secret = secret;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if either token secret is missing, if the two
    /// secrets are identical, or if the hash cost is outside the bcrypt
    /// range.
    pub fn validate(&self) -> Result<()> {
        self.auth.validate()
    }
}

impl AuthConfig {
    /// Validate the auth section. See [`Config::validate`].
    pub fn validate(&self) -> Result<()> {
        if self.access_token_secret.is_empty() {
            return Err(CredoError::Config(
                "access_token_secret is not set. \
                 Set it in the config file or via CREDO_ACCESS_TOKEN_SECRET."
                    .to_string(),
            ));
        }
        if self.refresh_token_secret.is_empty() {
            return Err(CredoError::Config(
                "refresh_token_secret is not set. \
                 Set it in the config file or via CREDO_REFRESH_TOKEN_SECRET."
                    .to_string(),
            ));
        }
        if self.access_token_secret == self.refresh_token_secret {
            return Err(CredoError::Config(
                "access_token_secret and refresh_token_secret must differ".to_string(),
            ));
        }
        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&self.hash_cost) {
            return Err(CredoError::Config(format!(
                "hash_cost must be between {MIN_HASH_COST} and {MAX_HASH_COST}, got {}",
                self.hash_cost
            )));
        }
        Ok(())
    }
}
