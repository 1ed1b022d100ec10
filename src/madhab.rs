//! # Fiqh Compliance: Madhab Debt & Jewelry Rules
//!
//! Each school of thought is bound to one [`DebtRules`] entry. The table is an
//! exhaustive `match`, so a new school cannot be added without defining its rules.
//!
//! | Madhab  | Debts deducted          | Personal jewelry      |
//! |---------|-------------------------|-----------------------|
//! | Hanafi  | All                     | Always zakatable      |
//! | Maliki  | None                    | Exempt unless savings |
//! | Shafi'i | Immediate / short-term  | Exempt unless savings |
//! | Hanbali | All                     | Exempt unless savings |
//!
//! The liability categories are already short-term by nature (personal debt,
//! bank loans and card debt, other current obligations), so the Shafi'i entry
//! deducts all three in full.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::assets::LiabilityCategory;
use crate::types::JewelryPurpose;

/// Islamic school of thought (Madhab) for Zakat calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Madhab {
    #[default]
    Hanafi,
    Maliki,
    #[serde(alias = "shafi")]
    #[strum(to_string = "shafii", serialize = "shafi")]
    Shafii,
    Hanbali,
}

/// Deduction and jewelry policy of a Madhab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtRules {
    /// Personal debt is subtracted.
    pub deduct_debts: bool,
    /// Bank loans and credit-card debt are subtracted.
    pub deduct_loans: bool,
    /// Other obligations are subtracted.
    pub deduct_other: bool,
    /// Gold and silver count regardless of the declared purpose.
    pub jewelry_always_zakatable: bool,
    /// Translation key of `description`.
    pub description_key: &'static str,
    pub description: &'static str,
}

impl DebtRules {
    pub fn deducts(&self, category: LiabilityCategory) -> bool {
        match category {
            LiabilityCategory::Debts => self.deduct_debts,
            LiabilityCategory::Loans => self.deduct_loans,
            LiabilityCategory::OtherLiabilities => self.deduct_other,
        }
    }

    /// Whether metal held for `purpose` is part of the zakatable base.
    pub fn jewelry_zakatable(&self, purpose: JewelryPurpose) -> bool {
        self.jewelry_always_zakatable || purpose == JewelryPurpose::Savings
    }
}

impl Madhab {
    pub const fn rules(&self) -> DebtRules {
        match self {
            Madhab::Hanafi => DebtRules {
                deduct_debts: true,
                deduct_loans: true,
                deduct_other: true,
                jewelry_always_zakatable: true,
                description_key: "rules-hanafi",
                description: "All debts are deducted. Gold and silver jewelry is always zakatable.",
            },
            Madhab::Maliki => DebtRules {
                deduct_debts: false,
                deduct_loans: false,
                deduct_other: false,
                jewelry_always_zakatable: false,
                description_key: "rules-maliki",
                description: "Debts are not deducted. Personal-use jewelry is exempt.",
            },
            Madhab::Shafii => DebtRules {
                deduct_debts: true,
                deduct_loans: true,
                deduct_other: true,
                jewelry_always_zakatable: false,
                description_key: "rules-shafii",
                description: "Only immediate (short-term) debts are deducted. Personal-use jewelry is exempt.",
            },
            Madhab::Hanbali => DebtRules {
                deduct_debts: true,
                deduct_loans: true,
                deduct_other: true,
                jewelry_always_zakatable: false,
                description_key: "rules-hanbali",
                description: "Debts are deducted. Personal-use jewelry is exempt.",
            },
        }
    }
}
