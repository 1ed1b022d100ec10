//! Prelude module for zakat-engine
//!
//! This module re-exports commonly used structs, traits, and types to allow
//! for easier usage of the library.
//!
//! # Usage
//!
//! ```rust
//! use zakat_engine::prelude::*;
//! ```

pub use crate::assets::{AssetCategory, AssetSnapshot, LiabilityCategory, LiabilitySnapshot, ZakatDeclaration};
pub use crate::builder::AssetBuilder;
pub use crate::config::ZakatConfig;
pub use crate::engine::{compute, compute_with_config};
pub use crate::i18n::{translator, CurrencyFormatter, Translator, ZakatLocale};
pub use crate::madhab::{DebtRules, Madhab};
pub use crate::normalize::{amount_to_input, format_currency, format_currency_as, format_input, parse_amount};
pub use crate::traits::CalculateZakat;
pub use crate::types::{
    CalculationOptions, CalculationStep, CalculationTrace, JewelryPurpose, NisabBasis, Operation, PropertyIntent,
    StockTreatment, ZakatError, ZakatResult,
};
