//! Configuration and settings management
//!
//! Loads settings from environment variables and optional config files.
//! Both settings are required: the process refuses to start without them.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading settings at startup. All of them are fatal.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Underlying configuration layering failed (typically a missing
    /// required environment variable)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// The bot token was present but empty
    #[error("TELEGRAM_TOKEN must not be empty")]
    EmptyToken,
    /// The operator recipient was present but not a usable chat id
    #[error("ADMIN_CHAT_ID must be a non-zero chat id")]
    InvalidAdminChatId,
}

/// Application settings loaded from environment variables
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Telegram Bot API token
    pub telegram_token: String,

    /// Chat id of the operator notified when a user completes onboarding
    pub admin_chat_id: i64,
}

impl Settings {
    /// Create new settings by loading from environment and files
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use onboard_bot::config::Settings;
    ///
    /// let settings = Settings::new().expect("Failed to load configuration");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`SettingsError`] if loading or validation fails.
    pub fn new() -> Result<Self, SettingsError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(File::with_name("config/default").required(false))
            // Add in the current environment file
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked into git
            .add_source(File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of APP)
            .add_source(Environment::with_prefix("APP").separator("__"))
            // Also add settings from environment variables directly (without prefix)
            // Note: Environment::default() auto-converts UPPER_SNAKE_CASE to snake_case
            // ignore_empty treats empty env vars as unset
            .add_source(Environment::default().ignore_empty(true))
            .build()?;

        let settings: Self = s.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that required values are usable, not merely present.
    ///
    /// # Errors
    ///
    /// Returns a [`SettingsError`] describing the first invalid setting.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.telegram_token.trim().is_empty() {
            return Err(SettingsError::EmptyToken);
        }
        if self.admin_chat_id == 0 {
            return Err(SettingsError::InvalidAdminChatId);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    // Env-mutating assertions live in a single test to avoid races between
    // parallel test threads.
    #[test]
    fn test_config_env_loading() -> Result<(), Box<dyn std::error::Error>> {
        // 1. Both settings present
        env::set_var("TELEGRAM_TOKEN", "dummy_token");
        env::set_var("ADMIN_CHAT_ID", "219002958");

        let settings = Settings::new()?;
        assert_eq!(settings.telegram_token, "dummy_token");
        assert_eq!(settings.admin_chat_id, 219_002_958);

        // 2. Missing operator id refuses to start
        env::remove_var("ADMIN_CHAT_ID");
        assert!(Settings::new().is_err());

        // 3. Empty token counts as unset
        env::set_var("TELEGRAM_TOKEN", "");
        env::set_var("ADMIN_CHAT_ID", "219002958");
        assert!(Settings::new().is_err());

        env::remove_var("TELEGRAM_TOKEN");
        env::remove_var("ADMIN_CHAT_ID");
        Ok(())
    }

    #[test]
    fn test_validation() {
        let settings = Settings {
            telegram_token: "dummy".to_string(),
            admin_chat_id: 42,
        };
        assert!(settings.validate().is_ok());

        let blank_token = Settings {
            telegram_token: "   ".to_string(),
            admin_chat_id: 42,
        };
        assert!(matches!(
            blank_token.validate(),
            Err(SettingsError::EmptyToken)
        ));

        let zero_admin = Settings {
            telegram_token: "dummy".to_string(),
            admin_chat_id: 0,
        };
        assert!(matches!(
            zero_admin.validate(),
            Err(SettingsError::InvalidAdminChatId)
        ));
    }
}
