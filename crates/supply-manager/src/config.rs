//! Runtime configuration.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

pub const STORAGE_ENV: &str = "SUPPLY_MANAGER_STORAGE";
pub const BUFFER_ENV: &str = "SUPPLY_MANAGER_BUFFER";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Values applied to fields omitted from a create request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductDefaults {
    pub stock_quantity: u32,
    pub replacement_interval_days: u32,
}

impl Default for ProductDefaults {
    fn default() -> Self {
        Self {
            stock_quantity: 1,
            replacement_interval_days: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SupplyConfig {
    /// JSON file holding the product records. In-memory only when absent.
    pub storage_path: Option<PathBuf>,
    /// Capacity of the product actor's request channel.
    pub channel_buffer: usize,
    pub default_stock_quantity: u32,
    pub default_replacement_interval_days: u32,
}

impl Default for SupplyConfig {
    fn default() -> Self {
        let defaults = ProductDefaults::default();
        Self {
            storage_path: None,
            channel_buffer: 32,
            default_stock_quantity: defaults.stock_quantity,
            default_replacement_interval_days: defaults.replacement_interval_days,
        }
    }
}

impl SupplyConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup(STORAGE_ENV).filter(|p| !p.trim().is_empty()) {
            config.storage_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = lookup(BUFFER_ENV) {
            config.channel_buffer = match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: BUFFER_ENV,
                        value: raw,
                    })
                }
            };
        }
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the running system cannot work with. Deserialized or hand-built
    /// configs bypass [`SupplyConfig::from_lookup`], so startup checks again.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_buffer == 0 {
            return Err(ConfigError::InvalidValue {
                key: "channel_buffer",
                value: self.channel_buffer.to_string(),
            });
        }
        if self.default_replacement_interval_days == 0 {
            return Err(ConfigError::InvalidValue {
                key: "default_replacement_interval_days",
                value: self.default_replacement_interval_days.to_string(),
            });
        }
        Ok(())
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    pub fn product_defaults(&self) -> ProductDefaults {
        ProductDefaults {
            stock_quantity: self.default_stock_quantity,
            replacement_interval_days: self.default_replacement_interval_days,
        }
    }
}
