//! Configuration and settings management
//!
//! Loads settings from environment variables (and an optional local
//! config file) via the `config` crate.

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

/// Application settings loaded from the environment.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Telegram Bot API token, from the `token` environment variable.
    #[serde(default)]
    pub token: String,
}

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The underlying config sources could not be read.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    /// The `token` variable is absent or empty.
    #[error("environment variable 'token' is not set")]
    MissingToken,
}

impl Settings {
    /// Create new settings by loading from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingToken`] when the `token`
    /// variable is unset or empty, or [`SettingsError::Load`] when the
    /// config sources cannot be read.
    pub fn new() -> Result<Self, SettingsError> {
        let s = Config::builder()
            // Local overrides, not checked into git
            .add_source(File::with_name("config/local").required(false))
            // ignore_empty treats empty env vars as unset
            .add_source(Environment::default().ignore_empty(true))
            .build()?;

        let settings: Self = s.try_deserialize()?;

        if settings.token.trim().is_empty() {
            return Err(SettingsError::MissingToken);
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    // One test fn so the env var manipulation cannot race with itself.
    #[test]
    fn test_token_loading() {
        env::set_var("token", "123456:dummy");
        let settings = Settings::new().expect("settings should load with a token set");
        assert_eq!(settings.token, "123456:dummy");

        env::set_var("token", "");
        let err = Settings::new().expect_err("empty token must be rejected");
        assert!(matches!(err, SettingsError::MissingToken));

        env::remove_var("token");
        let err = Settings::new().expect_err("missing token must be rejected");
        assert!(matches!(err, SettingsError::MissingToken));
    }
}
