//! Router configuration
//!
//! The output level is normally supplied through the `LOG_OUTPUT_LEVEL`
//! environment variable and re-applied to a [`SeverityGate`] whenever the
//! configuration is reloaded.

use super::{
    document::{DocumentKeys, LOGGER_NAME_KEY, MESSAGE_KEY},
    error::{Result, RouterError},
    gate::SeverityGate,
    severity::Severity,
};
use serde::{Deserialize, Serialize};

/// Environment variable naming the desired output level
pub const OUTPUT_LEVEL_ENV: &str = "LOG_OUTPUT_LEVEL";

/// Configuration for the routing core
///
/// # Example
///
/// ```
/// use rust_log_router::{RouterConfig, Severity, SeverityGate};
///
/// let config: RouterConfig = serde_json::from_str(r#"{"output_level": "WARN"}"#).unwrap();
/// let gate = SeverityGate::new();
/// config.apply(&gate).unwrap();
/// assert_eq!(gate.load(), Severity::Warn);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Threshold for the severity gate; must be set before `apply`
    pub output_level: Option<Severity>,

    /// Reserved document key for the logger name
    pub logger_name_key: String,

    /// Reserved document key for the message
    pub message_key: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            output_level: None,
            logger_name_key: LOGGER_NAME_KEY.to_string(),
            message_key: MESSAGE_KEY.to_string(),
        }
    }
}

impl RouterConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`; a missing output level
    /// variable parses as the empty string, i.e. `Info`. The value must be
    /// one of the level tokens exactly; surrounding whitespace is rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = lookup(OUTPUT_LEVEL_ENV).unwrap_or_default();
        let level: Severity = text.parse()?;
        Ok(Self {
            output_level: Some(level),
            ..Self::default()
        })
    }

    /// The configured threshold; `InvalidState` when unset
    pub fn output_level(&self) -> Result<Severity> {
        self.output_level
            .ok_or_else(|| RouterError::invalid_state("output level is not configured"))
    }

    /// Store the configured threshold into `gate`
    pub fn apply(&self, gate: &SeverityGate) -> Result<()> {
        gate.store(self.output_level()?);
        Ok(())
    }

    pub fn document_keys(&self) -> DocumentKeys {
        DocumentKeys {
            logger_name: self.logger_name_key.clone(),
            message: self.message_key.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.logger_name_key.is_empty() || self.message_key.is_empty() {
            return Err(RouterError::config(
                "RouterConfig",
                "reserved document keys must not be empty",
            ));
        }
        if self.logger_name_key == self.message_key {
            return Err(RouterError::config(
                "RouterConfig",
                format!(
                    "logger name and message share the key '{}'",
                    self.message_key
                ),
            ));
        }
        self.output_level().map(|_| ())
    }
}
