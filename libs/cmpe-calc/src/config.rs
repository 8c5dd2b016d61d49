//! Calculator configuration
//!
//! Loaded with figment. Priority (highest to lowest):
//! 1. Environment variables prefixed `CMPE_` (nested keys split on `__`)
//! 2. Config file (`cmpe.toml` / `cmpe.yaml` / `cmpe.json` in the working
//!    directory, or an explicit path)
//! 3. Default values

use crate::bits::MAX_WIDTH;
use crate::error::{CalcError, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "CMPE_";

/// Logging settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `cmpe_calc=debug`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Settings for the evaluation namespace
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CalcConfig {
    /// Width used by `ones`/`zeros` when the caller omits it
    pub default_bits: u32,
    /// Fractional digits in the byte-count report
    pub decimals: usize,
    pub logging: LoggingConfig,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            default_bits: 32,
            decimals: crate::size::DEFAULT_DECIMALS,
            logging: LoggingConfig::default(),
        }
    }
}

impl CalcConfig {
    /// Load from defaults, `cmpe.{toml,yaml,json}` and `CMPE_*` variables.
    pub fn load() -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file("cmpe.toml"))
            .merge(Yaml::file("cmpe.yaml"))
            .merge(Json::file("cmpe.json"))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::extract(figment)
    }

    /// Load from a specific file, layered over defaults and under `CMPE_*`.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| CalcError::config("Config file must have an extension"))?;

        let figment = Figment::from(Serialized::defaults(Self::default()));
        let figment = match extension {
            "toml" => figment.merge(Toml::file(path)),
            "yaml" | "yml" => figment.merge(Yaml::file(path)),
            "json" => figment.merge(Json::file(path)),
            _ => {
                return Err(CalcError::config(format!(
                    "Unsupported config file format: {}",
                    extension
                )))
            },
        };

        Self::extract(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config: Self = figment
            .extract()
            .map_err(|e| CalcError::config(format!("Failed to load configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.default_bits == 0 {
            return Err(CalcError::config("default_bits must be greater than zero"));
        }
        if self.default_bits > MAX_WIDTH {
            return Err(CalcError::config(format!(
                "default_bits must be at most {}",
                MAX_WIDTH
            )));
        }
        Ok(())
    }
}
