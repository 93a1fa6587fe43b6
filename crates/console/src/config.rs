//! Console configuration, read from environment variables.

use ims_observability::LogFormat;
use thiserror::Error;

pub const CURRENCY_SYMBOL_VAR: &str = "IMS_CURRENCY_SYMBOL";
pub const CLEAR_SCREEN_VAR: &str = "IMS_CLEAR_SCREEN";
pub const LOG_FORMAT_VAR: &str = "IMS_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: `{value}` ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Prefix used for every rendered (and accepted) price.
    pub currency_symbol: String,
    /// Emit an ANSI clear before each menu.
    pub clear_screen: bool,
    pub log_format: LogFormat,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            clear_screen: false,
            log_format: LogFormat::default(),
        }
    }
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup. Unset keys keep their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(symbol) = lookup(CURRENCY_SYMBOL_VAR) {
            config.currency_symbol = symbol;
        }

        if let Some(raw) = lookup(CLEAR_SCREEN_VAR) {
            config.clear_screen = parse_flag(&raw).ok_or_else(|| ConfigError::Invalid {
                key: CLEAR_SCREEN_VAR,
                value: raw.clone(),
                reason: "expected one of 1, 0, true, false, yes, no, on, off".to_string(),
            })?;
        }

        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            config.log_format = raw.parse().map_err(|reason| ConfigError::Invalid {
                key: LOG_FORMAT_VAR,
                value: raw.clone(),
                reason,
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
