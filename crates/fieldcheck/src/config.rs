//! Validator configuration

use crate::confirmation::DEFAULT_CONFIRMATION_FIELD;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use service_builder::builder;
use std::env;
use std::time::Duration;

pub struct ValidatorDefaults;

impl ValidatorDefaults {
    pub const ACTIVE_URL_TIMEOUT_MS: u64 = 5_000;
    pub const CONFIRMATION_FIELD: &'static str = DEFAULT_CONFIRMATION_FIELD;
}

/// Settings shared by every validation call of a [`crate::Validator`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder]
pub struct ValidatorConfig {
    /// Upper bound for one `active_url` reachability check
    #[builder(
        default = "Duration::from_millis(ValidatorDefaults::ACTIVE_URL_TIMEOUT_MS)",
        getter
    )]
    pub active_url_timeout: Duration,

    /// Companion field consulted by the `confirmed` rule
    #[builder(default = "ValidatorDefaults::CONFIRMATION_FIELD.to_string()", getter)]
    pub confirmation_field: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            active_url_timeout: Duration::from_millis(ValidatorDefaults::ACTIVE_URL_TIMEOUT_MS),
            confirmation_field: ValidatorDefaults::CONFIRMATION_FIELD.to_string(),
        }
    }
}

impl ValidatorConfig {
    /// Load from `FIELDCHECK_ACTIVE_URL_TIMEOUT_MS` and
    /// `FIELDCHECK_CONFIRMATION_FIELD`, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let timeout_ms = get_env_or_default(
            "FIELDCHECK_ACTIVE_URL_TIMEOUT_MS",
            &ValidatorDefaults::ACTIVE_URL_TIMEOUT_MS.to_string(),
        )
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidValue {
            field: "active_url_timeout".to_string(),
            value: env::var("FIELDCHECK_ACTIVE_URL_TIMEOUT_MS").unwrap_or_default(),
            expected: "valid number of milliseconds".to_string(),
        })?;

        let confirmation_field = get_env_or_default(
            "FIELDCHECK_CONFIRMATION_FIELD",
            ValidatorDefaults::CONFIRMATION_FIELD,
        );

        let config = Self {
            active_url_timeout: Duration::from_millis(timeout_ms),
            confirmation_field,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.active_url_timeout.is_zero() {
            return Err(ConfigError::validation_failed(
                "active_url timeout must be greater than 0",
            ));
        }

        if self.confirmation_field.trim().is_empty() {
            return Err(ConfigError::validation_failed(
                "Confirmation field name must be non-empty",
            ));
        }

        Ok(())
    }
}

impl ValidatorConfigBuilder {
    /// Short reachability timeout for test suites
    pub fn testing() -> Self {
        ValidatorConfigBuilder::new().active_url_timeout(Duration::from_millis(200))
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Global test lock to prevent concurrent environment modifications
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn clean_test_env() {
        env::remove_var("FIELDCHECK_ACTIVE_URL_TIMEOUT_MS");
        env::remove_var("FIELDCHECK_CONFIRMATION_FIELD");
    }

    #[test]
    fn test_default_config() {
        let config = ValidatorConfig::default();
        assert_eq!(config.active_url_timeout, Duration::from_secs(5));
        assert_eq!(config.confirmation_field, "Confirmation_password");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ValidatorConfigBuilder::new()
            .confirmation_field("password_confirmation".to_string())
            .build()
            .expect("Failed to build config");

        assert_eq!(config.get_confirmation_field(), "password_confirmation");
        assert_eq!(*config.get_active_url_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_builder_defaults_match_default_config() {
        let built = ValidatorConfigBuilder::new()
            .build()
            .expect("Failed to build config");
        assert_eq!(built, ValidatorConfig::default());
        assert_eq!(
            *built.get_active_url_timeout(),
            Duration::from_millis(ValidatorDefaults::ACTIVE_URL_TIMEOUT_MS)
        );
        assert_eq!(built.get_confirmation_field(), ValidatorDefaults::CONFIRMATION_FIELD);
    }

    #[test]
    fn test_testing_preset() {
        let config = ValidatorConfigBuilder::testing()
            .build()
            .expect("Failed to build config");
        assert_eq!(*config.get_active_url_timeout(), Duration::from_millis(200));
    }

    #[test]
    fn test_from_env() {
        let _guard = TEST_MUTEX.lock().unwrap();
        clean_test_env();

        env::set_var("FIELDCHECK_ACTIVE_URL_TIMEOUT_MS", "250");
        env::set_var("FIELDCHECK_CONFIRMATION_FIELD", "password_confirmation");

        let config = ValidatorConfig::from_env().unwrap();
        assert_eq!(config.active_url_timeout, Duration::from_millis(250));
        assert_eq!(config.confirmation_field, "password_confirmation");

        clean_test_env();
    }

    #[test]
    fn test_from_env_rejects_bad_values() {
        let _guard = TEST_MUTEX.lock().unwrap();
        clean_test_env();

        env::set_var("FIELDCHECK_ACTIVE_URL_TIMEOUT_MS", "soon");
        assert!(matches!(
            ValidatorConfig::from_env(),
            Err(ConfigError::InvalidValue { .. })
        ));

        env::set_var("FIELDCHECK_ACTIVE_URL_TIMEOUT_MS", "0");
        assert!(matches!(
            ValidatorConfig::from_env(),
            Err(ConfigError::ValidationFailed { .. })
        ));

        clean_test_env();
    }

    #[test]
    fn test_validate_rejects_empty_confirmation_field() {
        let config = ValidatorConfig {
            confirmation_field: "  ".to_string(),
            ..ValidatorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
