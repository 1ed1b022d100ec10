use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::i18n::{CurrencyFormatter, Translator, ZakatLocale};
use crate::inputs::IntoZakatDecimal;
use crate::madhab::Madhab;

/// Which metal defines the minimum-wealth threshold (Nisab).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum NisabBasis {
    /// 612.36g of silver. The lower threshold, recommended as more beneficial for the poor.
    #[default]
    Silver,
    /// 87.48g of gold.
    Gold,
}

/// How stocks and securities are converted into a Zakat contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StockTreatment {
    /// 25% of the market value is treated as zakatable (the company's liquid share), at 2.5%.
    Quarter,
    /// The full market value is treated like cash, at 2.5%.
    Cash,
    /// Stocks are productive capital: only this year's gains are zakatable, at 10%.
    #[default]
    Amana,
}

/// Declared purpose of personally held gold or silver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum JewelryPurpose {
    /// Worn jewelry. Exempt outside the Hanafi school.
    #[default]
    Personal,
    /// Held as savings or for trade. Always zakatable.
    #[serde(alias = "trade")]
    #[strum(to_string = "savings", serialize = "trade")]
    Savings,
}

/// Why investment property is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PropertyIntent {
    /// Held for rent. Only the rental income would be zakatable, so the capital counts as zero.
    Rental,
    /// Held for resale. The full value is zakatable trade goods.
    #[default]
    Resale,
}

/// The rule selections that accompany a snapshot into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CalculationOptions {
    pub nisab_basis: NisabBasis,
    pub stock_treatment: StockTreatment,
    pub madhab: Madhab,
    pub property_intent: PropertyIntent,
    pub gold_purpose: JewelryPurpose,
    pub silver_purpose: JewelryPurpose,
}

impl CalculationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nisab_basis(mut self, basis: NisabBasis) -> Self {
        self.nisab_basis = basis;
        self
    }

    pub fn stock_treatment(mut self, treatment: StockTreatment) -> Self {
        self.stock_treatment = treatment;
        self
    }

    pub fn madhab(mut self, madhab: Madhab) -> Self {
        self.madhab = madhab;
        self
    }

    pub fn property_intent(mut self, intent: PropertyIntent) -> Self {
        self.property_intent = intent;
        self
    }

    pub fn gold_purpose(mut self, purpose: JewelryPurpose) -> Self {
        self.gold_purpose = purpose;
        self
    }

    pub fn silver_purpose(mut self, purpose: JewelryPurpose) -> Self {
        self.silver_purpose = purpose;
        self
    }
}

/// The kind of arithmetic a trace step represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Initial,
    Add,
    Subtract,
    Compare,
    Rate,
    Result,
    Info,
}

impl Operation {
    fn symbol(&self) -> &'static str {
        match self {
            Operation::Initial | Operation::Info => " ",
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Compare => "?",
            Operation::Rate => "x",
            Operation::Result => "=",
        }
    }
}

/// A single step in the Zakat calculation process.
///
/// `step_key` is the translation key used by [`ZakatResult::explain_in`];
/// `description` is the English fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculationStep {
    pub step_key: String,
    pub description: String,
    pub amount: Option<Decimal>,
    pub operation: Operation,
}

impl CalculationStep {
    fn with_amount(
        step_key: impl Into<String>,
        description: impl Into<String>,
        amount: impl IntoZakatDecimal,
        operation: Operation,
    ) -> Self {
        Self {
            step_key: step_key.into(),
            description: description.into(),
            amount: amount.into_zakat_decimal().ok(),
            operation,
        }
    }

    pub fn initial(key: impl Into<String>, description: impl Into<String>, amount: impl IntoZakatDecimal) -> Self {
        Self::with_amount(key, description, amount, Operation::Initial)
    }

    pub fn add(key: impl Into<String>, description: impl Into<String>, amount: impl IntoZakatDecimal) -> Self {
        Self::with_amount(key, description, amount, Operation::Add)
    }

    pub fn subtract(key: impl Into<String>, description: impl Into<String>, amount: impl IntoZakatDecimal) -> Self {
        Self::with_amount(key, description, amount, Operation::Subtract)
    }

    pub fn compare(key: impl Into<String>, description: impl Into<String>, amount: impl IntoZakatDecimal) -> Self {
        Self::with_amount(key, description, amount, Operation::Compare)
    }

    pub fn rate(key: impl Into<String>, description: impl Into<String>, rate: impl IntoZakatDecimal) -> Self {
        Self::with_amount(key, description, rate, Operation::Rate)
    }

    pub fn result(key: impl Into<String>, description: impl Into<String>, amount: impl IntoZakatDecimal) -> Self {
        Self::with_amount(key, description, amount, Operation::Result)
    }

    pub fn info(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            step_key: key.into(),
            description: description.into(),
            amount: None,
            operation: Operation::Info,
        }
    }
}

/// Ordered list of calculation steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct CalculationTrace(pub Vec<CalculationStep>);

impl CalculationTrace {
    pub fn push(&mut self, step: CalculationStep) {
        self.0.push(step);
    }

    pub fn steps(&self) -> &[CalculationStep] {
        &self.0
    }

    /// Finds the first step recorded under `key`.
    pub fn find(&self, key: &str) -> Option<&CalculationStep> {
        self.0.iter().find(|step| step.step_key == key)
    }
}

/// The engine's output for one declaration.
///
/// Every amount is non-negative except `net_worth`, which goes negative when
/// deductible liabilities exceed the zakatable holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ZakatResult {
    /// Face value of every holding, before purpose or intent exclusions.
    pub total_assets: Decimal,
    /// Face value of every liability, before Madhab deduction rules.
    pub total_liabilities: Decimal,
    /// Liabilities actually subtracted under the selected Madhab.
    pub deductible_liabilities: Decimal,
    pub net_worth: Decimal,
    pub zakat_due: Decimal,
    /// Contribution of the stock treatment method.
    pub stock_zakat: Decimal,
    pub meets_nisab: bool,
    pub nisab_threshold: Decimal,
    /// Base wealth plus other investments plus zakatable property, before deductions.
    pub zakatable_wealth: Decimal,
    pub options: CalculationOptions,
    pub label: Option<String>,
    /// Currency every amount is expressed in.
    pub currency_code: String,
    pub calculation_trace: CalculationTrace,
}

impl ZakatResult {
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the Zakat due formatted with 2 decimal places.
    pub fn format_amount(&self) -> String {
        use rust_decimal::RoundingStrategy;
        let rounded = self.zakat_due.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.2}", rounded)
    }

    /// Returns a concise status string.
    /// Format: "{Label}: {Payable/Exempt} - Due: {Amount}"
    pub fn summary(&self) -> String {
        let label = self.label.as_deref().unwrap_or("Declaration");
        let status = if self.meets_nisab { "Payable" } else { "Exempt" };
        format!("{}: {} - Due: {}", label, status, self.format_amount())
    }

    /// Renders the calculation trace as an aligned, step-by-step explanation.
    pub fn explain(&self) -> String {
        let label = self.label.as_deref().unwrap_or("Declaration");
        let text = ExplanationText {
            header: format!(
                "Explanation for '{}' ({}, {}, {}):",
                label, self.options.madhab, self.options.nisab_basis, self.options.stock_treatment
            ),
            status_payable: "Status: PAYABLE".to_string(),
            amount_due: "Amount Due".to_string(),
            status_exempt: "Status: EXEMPT".to_string(),
            reason: "Reason: Net worth below Nisab threshold".to_string(),
        };
        self.render_explanation(
            &text,
            |step| step.description.clone(),
            |amount| format!("{:.2}", amount),
            |rate| format!("{:.3}", rate),
        )
    }

    /// Like [`explain`](Self::explain), with every line translated and
    /// amounts and rates formatted for `locale` in the result's currency.
    pub fn explain_in(&self, translator: &Translator, locale: ZakatLocale) -> String {
        let default_label = translator.translate_or(locale, "explain-default-label", "Declaration");
        let mut args = HashMap::new();
        args.insert("label".to_string(), self.label.clone().unwrap_or(default_label));
        args.insert("madhab".to_string(), self.options.madhab.to_string());
        args.insert("basis".to_string(), self.options.nisab_basis.to_string());
        args.insert("treatment".to_string(), self.options.stock_treatment.to_string());

        let text = ExplanationText {
            header: translator.translate_with_args(locale, "explain-header", &args),
            status_payable: translator.translate_or(locale, "explain-status-payable", "Status: PAYABLE"),
            amount_due: translator.translate_or(locale, "explain-amount-due", "Amount Due"),
            status_exempt: translator.translate_or(locale, "explain-status-exempt", "Status: EXEMPT"),
            reason: translator.translate_or(locale, "explain-reason-below-nisab", "Reason: Net worth below Nisab threshold"),
        };
        self.render_explanation(
            &text,
            |step| translator.translate_or(locale, &step.step_key, &step.description),
            |amount| locale.format_currency_as(amount, &self.currency_code),
            |rate| locale.format_decimal(rate),
        )
    }

    fn render_explanation(
        &self,
        text: &ExplanationText,
        label_of: impl Fn(&CalculationStep) -> String,
        format_amount: impl Fn(Decimal) -> String,
        format_rate: impl Fn(Decimal) -> String,
    ) -> String {
        use std::fmt::Write;
        let mut output = String::new();
        let labels: Vec<String> = self.calculation_trace.steps().iter().map(&label_of).collect();
        let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(20).max(20);

        let _ = writeln!(output, "{}", text.header);
        let _ = writeln!(output, "{:-<50}", "");

        for (step, label) in self.calculation_trace.steps().iter().zip(&labels) {
            match (step.operation, step.amount) {
                (Operation::Info, _) => {
                    let _ = writeln!(output, "  INFO: {}", label);
                }
                (Operation::Rate, Some(rate)) => {
                    let _ = writeln!(output, "  {:<width$} : {} {:>14}", label, step.operation.symbol(), format_rate(rate));
                }
                (op, Some(amount)) => {
                    let _ = writeln!(output, "  {:<width$} : {} {:>14}", label, op.symbol(), format_amount(amount));
                }
                (_, None) => {
                    let _ = writeln!(output, "  {:<width$} : [No Amount]", label);
                }
            }
        }

        let _ = writeln!(output, "{:-<50}", "");
        if self.meets_nisab {
            let _ = writeln!(output, "{}", text.status_payable);
            let _ = writeln!(output, "{}: {}", text.amount_due, format_amount(self.zakat_due));
        } else {
            let _ = writeln!(output, "{}", text.status_exempt);
            let _ = writeln!(output, "{}", text.reason);
        }
        output
    }
}

/// Fixed lines of an explanation, already in the target language.
struct ExplanationText {
    header: String,
    status_payable: String,
    amount_due: String,
    status_exempt: String,
    reason: String,
}

impl std::fmt::Display for ZakatResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Net Worth: {} | Nisab: {}", self.net_worth, self.nisab_threshold)?;
        if self.meets_nisab {
            write!(f, "Status: PAYABLE ({} due)", self.format_amount())
        } else {
            write!(f, "Status: EXEMPT - below Nisab")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum ZakatError {
    #[error("Configuration Error: {reason}")]
    ConfigurationError { reason: String },

    #[error("Invalid Input [{field}]: '{value}' - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("I/O Error [{path}]: {reason}")]
    Io { path: String, reason: String },
}

impl ZakatError {
    pub fn configuration(reason: impl Into<String>) -> Self {
        ZakatError::ConfigurationError { reason: reason.into() }
    }

    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        ZakatError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
