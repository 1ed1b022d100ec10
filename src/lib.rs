//! # zakat-engine
//!
//! Rules-based Zakat liability engine: declared assets and liabilities in,
//! net worth, Nisab status and the amount due out, under a selectable Madhab,
//! Nisab basis and stock treatment method.
//!
//! ```rust
//! use zakat_engine::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let assets = AssetSnapshot::new().bank_accounts(700_000);
//! let result = compute(&assets, &LiabilitySnapshot::new(), &CalculationOptions::new());
//!
//! assert!(result.meets_nisab);
//! assert_eq!(result.zakat_due, dec!(17500));
//! ```

#[macro_use]
mod macros;

pub mod assets;
pub mod builder;
pub mod config;
pub mod engine;
pub mod i18n;
pub mod inputs;
pub mod madhab;
pub mod normalize;
pub mod prelude;
pub mod traits;
pub mod types;

pub use assets::{AssetCategory, AssetSnapshot, LiabilityCategory, LiabilitySnapshot, ZakatDeclaration};
pub use config::ZakatConfig;
pub use engine::{compute, compute_with_config};
pub use madhab::{DebtRules, Madhab};
pub use traits::CalculateZakat;
pub use types::{CalculationOptions, ZakatError, ZakatResult};
