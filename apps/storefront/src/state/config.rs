//! # Configuration State
//!
//! Storefront configuration loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VITRINE_DISCOUNT_PERCENT=10                                        │
//! │     VITRINE_STRICT_VALIDATION=true                                     │
//! │     VITRINE_LOG=debug                                                  │
//! │     VITRINE_STORE_NAME="Loja Centro"                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $VITRINE_CONFIG, else                                              │
//! │     ~/.config/vitrine/storefront.toml (Linux)                          │
//! │     ~/Library/Application Support/com.vitrine.storefront/... (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! store_name = "Loja Centro"
//! discount_percent = 10
//! strict_validation = false
//! log_filter = "info,storefront=debug"
//! ```
//!
//! Read-only after initialization, so no lock is needed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use vitrine_core::validation::validate_discount_percent;
use vitrine_core::{DiscountPercent, NumericInput};

use crate::error::ConfigError;

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

/// Environment variable holding an explicit config file path.
pub const CONFIG_PATH_ENV: &str = "VITRINE_CONFIG";

const DISCOUNT_ENV: &str = "VITRINE_DISCOUNT_PERCENT";
const STRICT_ENV: &str = "VITRINE_STRICT_VALIDATION";
const LOG_ENV: &str = "VITRINE_LOG";
const STORE_NAME_ENV: &str = "VITRINE_STORE_NAME";

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Store name (shown on receipts).
    pub store_name: String,

    /// Discount applied to cart totals, in percent.
    /// Out-of-range values are clamped when used.
    pub discount_percent: f64,

    /// Run the strict validators on every payload the commands receive.
    pub strict_validation: bool,

    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        StorefrontConfig {
            store_name: "Vitrine".to_string(),
            discount_percent: 0.0,
            strict_validation: false,
            log_filter: "info".to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Loads configuration from the process environment, the config file
    /// and defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Loads configuration with an explicit file path and environment lookup.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. `config_path` if given, else the platform default path
    /// 3. Variables returned by `env`
    ///
    /// A missing file is not an error.
    pub fn load_with<F>(config_path: Option<PathBuf>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit = config_path.is_some();

        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) if explicit => {
                warn!(?path, "Config file not found, using defaults");
                Self::default()
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides(env)?;
        config.check_discount();

        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading storefront config from file");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The discount to apply, clamped to `[0, 100]`.
    pub fn discount(&self) -> DiscountPercent {
        DiscountPercent::normalize(&NumericInput::from(self.discount_percent))
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides<F>(&mut self, env: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = env(STORE_NAME_ENV) {
            if name.trim().is_empty() {
                warn!("Ignoring empty {}", STORE_NAME_ENV);
            } else {
                self.store_name = name;
            }
        }

        if let Some(raw) = env(DISCOUNT_ENV) {
            self.discount_percent = raw.trim().parse::<f64>().map_err(|e| ConfigError::InvalidValue {
                key: DISCOUNT_ENV.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            })?;
            debug!(discount = self.discount_percent, "Overriding discount from environment");
        }

        if let Some(raw) = env(STRICT_ENV) {
            self.strict_validation = parse_flag(&raw).ok_or_else(|| ConfigError::InvalidValue {
                key: STRICT_ENV.to_string(),
                value: raw.clone(),
                reason: "expected true/false, yes/no, on/off or 1/0".to_string(),
            })?;
        }

        if let Some(filter) = env(LOG_ENV) {
            self.log_filter = filter;
        }

        Ok(())
    }

    fn check_discount(&self) {
        let input = NumericInput::from(self.discount_percent);
        if let Err(e) = validate_discount_percent(&input) {
            warn!(
                discount = self.discount_percent,
                applied = self.discount().value(),
                error = %e,
                "Discount out of range, clamping"
            );
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "vitrine", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
