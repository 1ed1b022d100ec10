use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::debug;

use crate::builder::{AssetBuilder, Validate};
use crate::i18n::ZakatLocale;
use crate::inputs::IntoZakatDecimal;
use crate::types::{NisabBasis, ZakatError};

/// 2.5% on zakatable wealth.
pub const ZAKAT_RATE: Decimal = dec!(0.025);
/// 10% on stock gains under the amana (productive capital) method.
pub const AMANA_RATE: Decimal = dec!(0.10);
/// Share of the stock value counted under the quarter method.
pub const QUARTER_FRACTION: Decimal = dec!(0.25);
pub const NISAB_GOLD_GRAMS: Decimal = dec!(87.48);
pub const NISAB_SILVER_GRAMS: Decimal = dec!(612.36);
/// Approximate DKK per gram.
pub const GOLD_PRICE_PER_GRAM: Decimal = dec!(550);
/// Approximate DKK per gram.
pub const SILVER_PRICE_PER_GRAM: Decimal = dec!(7);

/// The single currency every amount is expressed in.
pub const CURRENCY_CODE: &str = "DKK";

pub const ENV_GOLD_PRICE: &str = "ZAKAT_GOLD_PRICE";
pub const ENV_SILVER_PRICE: &str = "ZAKAT_SILVER_PRICE";

/// Rates, Nisab weights and metal prices used by the engine.
///
/// Immutable once handed to the engine. Missing JSON fields take the
/// defaults above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ZakatConfig {
    pub zakat_rate: Decimal,
    pub amana_rate: Decimal,
    pub quarter_fraction: Decimal,
    pub nisab_gold_grams: Decimal,
    pub nisab_silver_grams: Decimal,
    pub gold_price_per_gram: Decimal,
    pub silver_price_per_gram: Decimal,
    pub locale: ZakatLocale,
    pub currency_code: String,
}

impl Default for ZakatConfig {
    fn default() -> Self {
        ZakatConfig {
            zakat_rate: ZAKAT_RATE,
            amana_rate: AMANA_RATE,
            quarter_fraction: QUARTER_FRACTION,
            nisab_gold_grams: NISAB_GOLD_GRAMS,
            nisab_silver_grams: NISAB_SILVER_GRAMS,
            gold_price_per_gram: GOLD_PRICE_PER_GRAM,
            silver_price_per_gram: SILVER_PRICE_PER_GRAM,
            locale: ZakatLocale::default(),
            currency_code: CURRENCY_CODE.to_string(),
        }
    }
}

impl std::str::FromStr for ZakatConfig {
    type Err = ZakatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: ZakatConfig = serde_json::from_str(s)
            .map_err(|e| ZakatError::configuration(format!("Failed to parse config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

impl ZakatConfig {
    pub fn builder() -> ZakatConfigBuilder {
        ZakatConfigBuilder::default()
    }

    /// Default configuration with the given metal prices.
    pub fn new(gold_price: impl IntoZakatDecimal, silver_price: impl IntoZakatDecimal) -> Result<Self, ZakatError> {
        let config = Self {
            gold_price_per_gram: gold_price.into_zakat_decimal()?,
            silver_price_per_gram: silver_price.into_zakat_decimal()?,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for logical consistency.
    pub fn validate(&self) -> Result<(), ZakatError> {
        let non_negative = [
            ("gold_price_per_gram", self.gold_price_per_gram),
            ("silver_price_per_gram", self.silver_price_per_gram),
            ("nisab_gold_grams", self.nisab_gold_grams),
            ("nisab_silver_grams", self.nisab_silver_grams),
        ];
        for (field, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(ZakatError::invalid_input(field, value.to_string(), "Must be non-negative"));
            }
        }

        let fractions = [
            ("zakat_rate", self.zakat_rate),
            ("amana_rate", self.amana_rate),
            ("quarter_fraction", self.quarter_fraction),
        ];
        for (field, value) in fractions {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(ZakatError::invalid_input(field, value.to_string(), "Must be between 0 and 1"));
            }
        }

        if self.currency_code.trim().is_empty() {
            return Err(ZakatError::configuration("Currency code must not be empty"));
        }
        Ok(())
    }

    /// Loads the defaults, overriding metal prices from `ZAKAT_GOLD_PRICE`
    /// and `ZAKAT_SILVER_PRICE` when set.
    pub fn from_env() -> Result<Self, ZakatError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ZakatError> {
        let mut config = Self::default();

        let read_price = |key: &str| -> Result<Option<Decimal>, ZakatError> {
            match lookup(key) {
                Some(raw) => {
                    let price = raw.trim().parse::<Decimal>().map_err(|e| {
                        ZakatError::configuration(format!("Invalid {} value '{}': {}", key, raw, e))
                    })?;
                    debug!("{} overrides default price: {}", key, price);
                    Ok(Some(price))
                }
                None => Ok(None),
            }
        };

        if let Some(gold) = read_price(ENV_GOLD_PRICE)? {
            config.gold_price_per_gram = gold;
        }
        if let Some(silver) = read_price(ENV_SILVER_PRICE)? {
            config.silver_price_per_gram = silver;
        }

        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a JSON file.
    pub fn try_from_json(path: &str) -> Result<Self, ZakatError> {
        let content = fs::read_to_string(path).map_err(|e| ZakatError::Io {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        content.parse()
    }

    // ========== Fluent Helper Methods ==========

    pub fn with_gold_price(mut self, price: impl IntoZakatDecimal) -> Result<Self, ZakatError> {
        self.gold_price_per_gram = price.into_zakat_decimal()?;
        Ok(self)
    }

    pub fn with_silver_price(mut self, price: impl IntoZakatDecimal) -> Result<Self, ZakatError> {
        self.silver_price_per_gram = price.into_zakat_decimal()?;
        Ok(self)
    }

    pub fn with_locale(mut self, locale: ZakatLocale) -> Self {
        self.locale = locale;
        self
    }

    /// Renders `amount` in the configured locale and currency.
    pub fn format_currency(&self, amount: Decimal) -> String {
        crate::normalize::format_currency_as(amount, self.locale, &self.currency_code)
    }

    /// Minimum net worth before Zakat is due: Nisab weight times price per gram.
    pub fn nisab_threshold(&self, basis: NisabBasis) -> Decimal {
        match basis {
            NisabBasis::Gold => self.nisab_gold_grams.saturating_mul(self.gold_price_per_gram),
            NisabBasis::Silver => self.nisab_silver_grams.saturating_mul(self.silver_price_per_gram),
        }
    }
}

// ========== ZakatConfigBuilder ==========

#[derive(Default)]
pub struct ZakatConfigBuilder {
    gold_price: Option<Decimal>,
    silver_price: Option<Decimal>,
    nisab_gold: Option<Decimal>,
    nisab_silver: Option<Decimal>,
    zakat_rate: Option<Decimal>,
    amana_rate: Option<Decimal>,
    quarter_fraction: Option<Decimal>,
    locale: Option<ZakatLocale>,
    currency_code: Option<String>,
    errors: Vec<ZakatError>,
}

impl ZakatConfigBuilder {
    fn capture(&mut self, value: impl IntoZakatDecimal) -> Option<Decimal> {
        match value.into_zakat_decimal() {
            Ok(v) => Some(v),
            Err(e) => {
                self.errors.push(e);
                None
            }
        }
    }

    pub fn gold_price(mut self, price: impl IntoZakatDecimal) -> Self {
        self.gold_price = self.capture(price);
        self
    }

    pub fn silver_price(mut self, price: impl IntoZakatDecimal) -> Self {
        self.silver_price = self.capture(price);
        self
    }

    pub fn nisab_gold(mut self, grams: impl IntoZakatDecimal) -> Self {
        self.nisab_gold = self.capture(grams);
        self
    }

    pub fn nisab_silver(mut self, grams: impl IntoZakatDecimal) -> Self {
        self.nisab_silver = self.capture(grams);
        self
    }

    pub fn zakat_rate(mut self, rate: impl IntoZakatDecimal) -> Self {
        self.zakat_rate = self.capture(rate);
        self
    }

    pub fn amana_rate(mut self, rate: impl IntoZakatDecimal) -> Self {
        self.amana_rate = self.capture(rate);
        self
    }

    pub fn quarter_fraction(mut self, fraction: impl IntoZakatDecimal) -> Self {
        self.quarter_fraction = self.capture(fraction);
        self
    }

    pub fn locale(mut self, locale: ZakatLocale) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn currency_code(mut self, code: impl Into<String>) -> Self {
        self.currency_code = Some(code.into());
        self
    }
}

impl Validate for ZakatConfigBuilder {
    fn validate(&self) -> Result<(), ZakatError> {
        match self.errors.first() {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

impl AssetBuilder<ZakatConfig> for ZakatConfigBuilder {
    fn build(self) -> Result<ZakatConfig, ZakatError> {
        Validate::validate(&self)?;

        let defaults = ZakatConfig::default();
        let config = ZakatConfig {
            zakat_rate: self.zakat_rate.unwrap_or(defaults.zakat_rate),
            amana_rate: self.amana_rate.unwrap_or(defaults.amana_rate),
            quarter_fraction: self.quarter_fraction.unwrap_or(defaults.quarter_fraction),
            nisab_gold_grams: self.nisab_gold.unwrap_or(defaults.nisab_gold_grams),
            nisab_silver_grams: self.nisab_silver.unwrap_or(defaults.nisab_silver_grams),
            gold_price_per_gram: self.gold_price.unwrap_or(defaults.gold_price_per_gram),
            silver_price_per_gram: self.silver_price.unwrap_or(defaults.silver_price_per_gram),
            locale: self.locale.unwrap_or(defaults.locale),
            currency_code: self.currency_code.unwrap_or(defaults.currency_code),
        };

        config.validate()?;
        Ok(config)
    }
}
