//! Persistent CLI Configuration Loader
//!
//! Defaults for the `calculate` command are read from
//! `~/.config/zakat/config.toml` on Linux, `~/Library/Application Support/zakat/`
//! on macOS or `%APPDATA%\zakat\config.toml` on Windows. Command-line flags
//! always win over the file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use zakat_engine::prelude::*;

/// CLI Configuration structure loaded from TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CliConfig {
    /// Gold price per gram overriding the built-in default.
    pub gold_price: Option<Decimal>,
    /// Silver price per gram overriding the built-in default.
    pub silver_price: Option<Decimal>,
    /// Display locale ("da-DK" or "en-US").
    pub locale: Option<ZakatLocale>,
    /// Preferred Madhab ("hanafi", "maliki", "shafii", "hanbali").
    pub madhab: Option<Madhab>,
    /// Nisab basis ("silver" or "gold").
    pub nisab_basis: Option<NisabBasis>,
    /// Stock method ("quarter", "cash" or "amana").
    pub stock_treatment: Option<StockTreatment>,
    /// Enable file logging by default.
    pub enable_logging: Option<bool>,
}

impl CliConfig {
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("zakat"))
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Loads the file at the default location.
    /// Returns `CliConfig::default()` if the file doesn't exist or fails to parse.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("Could not determine config directory");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!("No config file found at {:?}", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<CliConfig>(&content) {
                Ok(config) => {
                    debug!("Loaded configuration from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse config file {:?}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Applies the file's price and locale overrides on top of `base`.
    pub fn apply_to(&self, mut base: ZakatConfig) -> Result<ZakatConfig, ZakatError> {
        if let Some(gold) = self.gold_price {
            base = base.with_gold_price(gold)?;
        }
        if let Some(silver) = self.silver_price {
            base = base.with_silver_price(silver)?;
        }
        if let Some(locale) = self.locale {
            base = base.with_locale(locale);
        }
        base.validate()?;
        Ok(base)
    }
}
