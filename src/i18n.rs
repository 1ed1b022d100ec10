use fixed_decimal::FixedDecimal;
use fluent_bundle::bundle::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use icu::decimal::{options::FixedDecimalFormatterOptions, FixedDecimalFormatter};
use icu::locid::Locale;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_embed::RustEmbed;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator};
use tracing::warn;
use unic_langid::LanguageIdentifier;
use writeable::Writeable;

use crate::config::CURRENCY_CODE;
use crate::types::ZakatError;

#[derive(RustEmbed)]
#[folder = "assets/locales"]
struct Asset;

type ConcurrentBundle = FluentBundle<FluentResource, intl_memoizer::concurrent::IntlLangMemoizer>;

/// Display locales. Amounts are always in the single configured currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize, JsonSchema, EnumIter)]
pub enum ZakatLocale {
    #[default]
    #[serde(rename = "da-DK")]
    DaDK,
    #[serde(rename = "en-US")]
    EnUS,
}

impl ZakatLocale {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZakatLocale::DaDK => "da-DK",
            ZakatLocale::EnUS => "en-US",
        }
    }

    pub fn to_icu_locale(&self) -> Locale {
        self.as_str().parse().unwrap_or(Locale::UND)
    }

    fn language_id(&self) -> LanguageIdentifier {
        self.as_str().parse().unwrap_or_default()
    }

    /// Attaches the currency to a formatted number. Danish output writes
    /// DKK as `kr.` after the amount; other codes follow the amount as-is.
    fn decorate(&self, number: &str, currency_code: &str) -> String {
        match self {
            ZakatLocale::DaDK if currency_code.eq_ignore_ascii_case(CURRENCY_CODE) => format!("{} kr.", number),
            ZakatLocale::DaDK => format!("{} {}", number, currency_code),
            ZakatLocale::EnUS => format!("{} {}", currency_code, number),
        }
    }

    /// Formats `digits` (canonical `.` decimal text) with ICU4X for this locale.
    fn format_digits(&self, digits: &str) -> String {
        let formatter = FixedDecimalFormatter::try_new(&self.to_icu_locale().into(), FixedDecimalFormatterOptions::default());

        match (formatter, FixedDecimal::from_str(digits)) {
            (Ok(formatter), Ok(fixed)) => formatter.format(&fixed).write_to_string().into_owned(),
            (Err(e), _) => {
                warn!("ICU decimal formatter unavailable for {}: {}", self, e);
                digits.to_string()
            }
            (_, Err(e)) => {
                warn!("Could not convert {} for ICU formatting: {}", digits, e);
                digits.to_string()
            }
        }
    }

    /// Formats a plain number (such as a rate) with the locale's separators,
    /// e.g. `0,025` for `da-DK`.
    pub fn format_decimal(&self, value: Decimal) -> String {
        self.format_digits(&value.normalize().to_string())
    }
}

impl std::fmt::Display for ZakatLocale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZakatLocale {
    type Err = ZakatError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "da-DK" | "da" => Ok(ZakatLocale::DaDK),
            "en-US" | "en" => Ok(ZakatLocale::EnUS),
            _ => Err(ZakatError::invalid_input("locale", s, "Unsupported locale")),
        }
    }
}

/// Currency rendering for a locale.
pub trait CurrencyFormatter {
    /// Formats `amount` in the default currency (DKK).
    fn format_currency(&self, amount: Decimal) -> String {
        self.format_currency_as(amount, CURRENCY_CODE)
    }

    fn format_currency_as(&self, amount: Decimal, currency_code: &str) -> String;
}

impl CurrencyFormatter for ZakatLocale {
    fn format_currency_as(&self, amount: Decimal, currency_code: &str) -> String {
        let number = self.format_digits(&format!("{:.2}", amount));
        self.decorate(&number, currency_code)
    }
}

/// Fluent-backed translations for trace steps, rule descriptions and labels.
#[derive(Clone)]
pub struct Translator {
    bundles: std::sync::Arc<HashMap<ZakatLocale, ConcurrentBundle>>,
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("locales", &self.bundles.keys())
            .finish()
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    pub fn new() -> Self {
        let mut bundles = HashMap::new();

        for locale in ZakatLocale::iter() {
            let mut bundle = FluentBundle::new_concurrent(vec![locale.language_id()]);
            bundle.set_use_isolating(false);

            let file_path = format!("{}/main.ftl", locale.as_str());
            match Asset::get(&file_path) {
                Some(file) => match std::str::from_utf8(file.data.as_ref()) {
                    Ok(source) => {
                        let resource = FluentResource::try_new(source.to_string()).unwrap_or_else(|(partial, errors)| {
                            warn!("{} parse errors in {}", errors.len(), file_path);
                            partial
                        });
                        if let Err(errors) = bundle.add_resource(resource) {
                            warn!("{} duplicate messages in {}", errors.len(), file_path);
                        }
                    }
                    Err(e) => warn!("Translation file {} is not UTF-8: {}", file_path, e),
                },
                None => warn!("Translation file not found for {}", locale),
            }

            bundles.insert(locale, bundle);
        }

        Translator { bundles: std::sync::Arc::new(bundles) }
    }

    fn lookup(&self, locale: ZakatLocale, key: &str, args: Option<&FluentArgs>) -> Option<String> {
        let bundle = self.bundles.get(&locale)?;
        let pattern = bundle.get_message(key)?.value()?;
        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, args, &mut errors);
        Some(value.into_owned())
    }

    /// Translates `key`, falling back to English and then to `MISSING:{key}`.
    pub fn translate(&self, locale: ZakatLocale, key: &str, args: Option<&FluentArgs>) -> String {
        self.lookup(locale, key, args)
            .or_else(|| self.lookup(ZakatLocale::EnUS, key, args))
            .unwrap_or_else(|| format!("MISSING:{}", key))
    }

    /// Translates `key`, falling back to English and then to `fallback`.
    pub fn translate_or(&self, locale: ZakatLocale, key: &str, fallback: &str) -> String {
        self.lookup(locale, key, None)
            .or_else(|| self.lookup(ZakatLocale::EnUS, key, None))
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn translate_with_args(&self, locale: ZakatLocale, key: &str, args: &HashMap<String, String>) -> String {
        let mut f_args = FluentArgs::new();
        for (k, v) in args {
            f_args.set(k.as_str(), v.to_string());
        }
        self.translate(locale, key, Some(&f_args))
    }
}

static TRANSLATOR: Lazy<Translator> = Lazy::new(Translator::new);

/// Process-wide translator, built on first use.
pub fn translator() -> &'static Translator {
    &TRANSLATOR
}
