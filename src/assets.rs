//! Asset and liability snapshots, and the declaration that bundles them.
//!
//! Both snapshots are closed sets: the engine recognizes exactly the
//! categories listed here. Adding one means extending the snapshot and the
//! classification below together, which the exhaustive matches enforce.

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::ZakatConfig;
use crate::traits::CalculateZakat;
use crate::types::{CalculationOptions, ZakatResult};

zakat_snapshot! {
    /// Declared assets, each at market or face value.
    pub struct AssetSnapshot;
    /// Closed set of asset categories.
    pub enum AssetCategory {
        /// Physical cash on hand.
        cash => Cash,
        /// Bank account balances.
        bank_accounts => BankAccounts,
        /// Market value of gold.
        gold => Gold,
        /// Market value of silver.
        silver => Silver,
        /// Market value of stocks and securities.
        stocks => Stocks,
        /// Gains on stocks this year (used by the amana method).
        stock_gains => StockGains,
        /// Business inventory held for sale.
        business_inventory => BusinessInventory,
        /// Investment property value.
        property_investment => PropertyInvestment,
        /// Other investments such as crypto.
        other_investments => OtherInvestments,
        /// Money owed to the declarant.
        receivables => Receivables,
    }
}

zakat_snapshot! {
    /// Declared liabilities.
    pub struct LiabilitySnapshot;
    /// Closed set of liability categories.
    pub enum LiabilityCategory {
        /// Personal (short-term) debt.
        debts => Debts,
        /// Bank loans and credit-card debt.
        loans => Loans,
        /// Other obligations.
        other_liabilities => OtherLiabilities,
    }
}

impl AssetCategory {
    /// Categories summed directly into the base zakatable wealth.
    ///
    /// Gold and silver enter the base through the jewelry rule, while stocks,
    /// other investments and property each follow their own inclusion rule.
    pub fn is_base_wealth(&self) -> bool {
        match self {
            AssetCategory::Cash
            | AssetCategory::BankAccounts
            | AssetCategory::BusinessInventory
            | AssetCategory::Receivables => true,
            AssetCategory::Gold
            | AssetCategory::Silver
            | AssetCategory::Stocks
            | AssetCategory::StockGains
            | AssetCategory::PropertyInvestment
            | AssetCategory::OtherInvestments => false,
        }
    }

    /// Whether the category is a holding rather than a figure derived from one.
    /// Stock gains are part of the stock value and never counted twice.
    pub fn is_holding(&self) -> bool {
        !matches!(self, AssetCategory::StockGains)
    }
}

impl AssetSnapshot {
    /// Face value of every holding, ignoring purpose and intent exclusions.
    pub fn total(&self) -> Decimal {
        self.sum_where(|c| c.is_holding())
    }
}

impl LiabilitySnapshot {
    /// Face value of every liability, ignoring Madhab deduction rules.
    pub fn total(&self) -> Decimal {
        self.sum_where(|_| true)
    }
}

/// A complete input record: what is owned, what is owed, and which rules apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ZakatDeclaration {
    pub label: Option<String>,
    pub assets: AssetSnapshot,
    pub liabilities: LiabilitySnapshot,
    pub options: CalculationOptions,
}

impl ZakatDeclaration {
    pub fn new(assets: AssetSnapshot, liabilities: LiabilitySnapshot, options: CalculationOptions) -> Self {
        Self {
            label: None,
            assets,
            liabilities,
            options,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl CalculateZakat for ZakatDeclaration {
    fn calculate_zakat(&self, config: &ZakatConfig) -> ZakatResult {
        let result = crate::engine::compute_with_config(config, &self.assets, &self.liabilities, &self.options);
        match &self.label {
            Some(label) => result.with_label(label.clone()),
            None => result,
        }
    }

    fn get_label(&self) -> Option<String> {
        self.label.clone()
    }
}
