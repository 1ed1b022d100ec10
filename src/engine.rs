//! # Calculation Engine
//!
//! One pure entry point: a declaration snapshot plus rule selections in, a
//! [`ZakatResult`] out. No I/O, no shared mutable state, no failure paths.
//!
//! ## Formula
//! 1. Nisab threshold from the selected metal.
//! 2. Debt and jewelry rules from the selected Madhab.
//! 3. Gold and silver count unless the Madhab exempts personal-use jewelry.
//! 4. Investment property counts only when held for resale.
//! 5. Base wealth = cash + bank + inventory + receivables + zakatable metals.
//! 6. Deductible liabilities per the Madhab rule table.
//! 7. Stock contribution per treatment method (quarter, cash, amana).
//! 8. Net worth = base + property + other investments + stocks - deductions.
//! 9. Below Nisab: nothing is due.
//! 10. Otherwise: (base + other investments + property - deductions) x 2.5%,
//!     plus the stock contribution, floored at zero.
//!
//! Arithmetic saturates instead of overflowing.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use tracing::debug;

use crate::assets::{AssetCategory, AssetSnapshot, LiabilityCategory, LiabilitySnapshot};
use crate::config::ZakatConfig;
use crate::types::{
    CalculationOptions, CalculationStep, CalculationTrace, PropertyIntent, StockTreatment, ZakatResult,
};

static DEFAULT_CONFIG: Lazy<ZakatConfig> = Lazy::new(ZakatConfig::default);

/// Computes the Zakat liability with the built-in rates, weights and prices.
pub fn compute(assets: &AssetSnapshot, liabilities: &LiabilitySnapshot, options: &CalculationOptions) -> ZakatResult {
    compute_with_config(&DEFAULT_CONFIG, assets, liabilities, options)
}

/// Computes the Zakat liability under an explicit configuration.
pub fn compute_with_config(
    config: &ZakatConfig,
    assets: &AssetSnapshot,
    liabilities: &LiabilitySnapshot,
    options: &CalculationOptions,
) -> ZakatResult {
    let mut trace = CalculationTrace::default();

    let nisab_threshold = config.nisab_threshold(options.nisab_basis);
    let rules = options.madhab.rules();
    debug!(
        madhab = %options.madhab,
        nisab_basis = %options.nisab_basis,
        %nisab_threshold,
        "resolved rules: {}",
        rules.description
    );

    let gold = assets.get(AssetCategory::Gold);
    let silver = assets.get(AssetCategory::Silver);
    let zakatable_gold = if rules.jewelry_zakatable(options.gold_purpose) { gold } else { Decimal::ZERO };
    let zakatable_silver = if rules.jewelry_zakatable(options.silver_purpose) { silver } else { Decimal::ZERO };

    let property = assets.get(AssetCategory::PropertyInvestment);
    let zakatable_property = match options.property_intent {
        PropertyIntent::Resale => property,
        PropertyIntent::Rental => Decimal::ZERO,
    };

    let liquid = assets.sum_where(|c| c.is_base_wealth());
    let base_wealth = liquid.saturating_add(zakatable_gold).saturating_add(zakatable_silver);
    trace.push(CalculationStep::initial("step-base-wealth", "Cash, Bank, Inventory & Receivables", liquid));
    push_metal(&mut trace, "gold", gold, zakatable_gold);
    push_metal(&mut trace, "silver", silver, zakatable_silver);

    let other_investments = assets.get(AssetCategory::OtherInvestments);
    if !other_investments.is_zero() {
        trace.push(CalculationStep::add("step-other-investments", "Other Investments (Crypto)", other_investments));
    }
    if !zakatable_property.is_zero() {
        trace.push(CalculationStep::add("step-zakatable-property", "Investment Property (Resale)", zakatable_property));
    } else if !property.is_zero() {
        trace.push(CalculationStep::info(
            "step-property-rental",
            "Rental property is excluded from zakatable wealth",
        ));
    }

    let deductible_liabilities = liabilities.sum_where(|c: LiabilityCategory| rules.deducts(c));
    if deductible_liabilities.is_zero() && !liabilities.is_empty() {
        trace.push(CalculationStep::info("step-no-deduction", "Debts are not deducted in this Madhab"));
    }

    let stocks = assets.get(AssetCategory::Stocks);
    let stock_zakat = match options.stock_treatment {
        StockTreatment::Quarter => stocks.saturating_mul(config.quarter_fraction).saturating_mul(config.zakat_rate),
        StockTreatment::Cash => stocks.saturating_mul(config.zakat_rate),
        StockTreatment::Amana => {
            let gains = assets.get(AssetCategory::StockGains);
            if gains > Decimal::ZERO { gains.saturating_mul(config.amana_rate) } else { Decimal::ZERO }
        }
    };
    if !stocks.is_zero() {
        trace.push(CalculationStep::add("step-stocks", "Stocks & Securities", stocks));
    }

    let zakatable_wealth = base_wealth
        .saturating_add(other_investments)
        .saturating_add(zakatable_property);
    let net_worth = zakatable_wealth.saturating_add(stocks).saturating_sub(deductible_liabilities);
    trace.push(CalculationStep::subtract(
        "step-deductible-liabilities",
        "Deductible Liabilities",
        deductible_liabilities,
    ));
    trace.push(CalculationStep::result("step-net-worth", "Net Worth", net_worth));
    trace.push(CalculationStep::compare("step-nisab-threshold", "Nisab Threshold", nisab_threshold));

    // Negative (or zero) net worth never meets Nisab, even with a zero threshold.
    let meets_nisab = net_worth >= nisab_threshold && net_worth > Decimal::ZERO;

    let zakat_due = if meets_nisab {
        let base_zakat = zakatable_wealth
            .saturating_sub(deductible_liabilities)
            .saturating_mul(config.zakat_rate);
        let due = base_zakat.saturating_add(stock_zakat).max(Decimal::ZERO);

        trace.push(CalculationStep::rate("step-zakat-rate", "Zakat Rate", config.zakat_rate));
        trace.push(CalculationStep::result("step-base-zakat", "Zakat on Wealth", base_zakat));
        trace.push(CalculationStep::add("step-stock-zakat", "Zakat on Stocks", stock_zakat));
        trace.push(CalculationStep::result("step-zakat-due", "Zakat Due", due));
        due
    } else {
        trace.push(CalculationStep::info("step-below-nisab", "Net worth below Nisab - No Zakat Due"));
        Decimal::ZERO
    };

    let result = ZakatResult {
        total_assets: assets.total(),
        total_liabilities: liabilities.total(),
        deductible_liabilities,
        net_worth,
        zakat_due,
        stock_zakat,
        meets_nisab,
        nisab_threshold,
        zakatable_wealth,
        options: *options,
        label: None,
        currency_code: config.currency_code.clone(),
        calculation_trace: trace,
    };

    debug!(
        net_worth = %result.net_worth,
        zakat_due = %result.zakat_due,
        stock_zakat = %result.stock_zakat,
        meets_nisab = result.meets_nisab,
        "zakat computed"
    );
    result
}

fn push_metal(trace: &mut CalculationTrace, metal: &str, entered: Decimal, zakatable: Decimal) {
    if !zakatable.is_zero() {
        let description = if metal == "gold" { "Zakatable Gold" } else { "Zakatable Silver" };
        trace.push(CalculationStep::add(format!("step-zakatable-{}", metal), description, zakatable));
    } else if !entered.is_zero() {
        let description = if metal == "gold" {
            "Personal gold jewelry is exempt in this Madhab"
        } else {
            "Personal silver jewelry is exempt in this Madhab"
        };
        trace.push(CalculationStep::info(format!("step-{}-exempt", metal), description));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::AssetBuilder;
    use crate::madhab::Madhab;
    use crate::types::{JewelryPurpose, NisabBasis};
    use rust_decimal_macros::dec;

    fn no_liabilities() -> LiabilitySnapshot {
        LiabilitySnapshot::default()
    }

    #[test]
    fn test_cash_method_taxes_full_stock_value() {
        let assets = AssetSnapshot::new().stocks(100_000).stock_gains(20_000);
        let options = CalculationOptions::new().stock_treatment(StockTreatment::Cash);
        let res = compute(&assets, &no_liabilities(), &options);

        assert_eq!(res.stock_zakat, dec!(2500));
        assert_eq!(res.zakat_due, dec!(2500));
        // Gains are ignored outside the amana method.
        assert_eq!(res.net_worth, dec!(100000));
    }

    #[test]
    fn test_liabilities_reduce_base_zakat() {
        let assets = AssetSnapshot::new().bank_accounts(100_000);
        let liabilities = LiabilitySnapshot::new().debts(10_000).loans(20_000).other_liabilities(5_000);
        let res = compute(&assets, &liabilities, &CalculationOptions::new());

        assert_eq!(res.deductible_liabilities, dec!(35000));
        assert_eq!(res.total_liabilities, dec!(35000));
        assert_eq!(res.net_worth, dec!(65000));
        assert_eq!(res.zakat_due, dec!(1625));
    }

    #[test]
    fn test_maliki_ignores_liabilities() {
        let assets = AssetSnapshot::new().bank_accounts(100_000);
        let liabilities = LiabilitySnapshot::new().debts(10_000).loans(20_000);
        let options = CalculationOptions::new().madhab(Madhab::Maliki);
        let res = compute(&assets, &liabilities, &options);

        assert_eq!(res.deductible_liabilities, Decimal::ZERO);
        assert_eq!(res.total_liabilities, dec!(30000));
        assert_eq!(res.zakat_due, dec!(2500));
        assert!(res.calculation_trace.find("step-no-deduction").is_some());
    }

    #[test]
    fn test_savings_gold_counts_outside_hanafi() {
        let assets = AssetSnapshot::new().gold(50_000).silver(10_000);
        let options = CalculationOptions::new()
            .madhab(Madhab::Shafii)
            .gold_purpose(JewelryPurpose::Savings)
            .silver_purpose(JewelryPurpose::Personal);
        let res = compute(&assets, &no_liabilities(), &options);

        assert_eq!(res.net_worth, dec!(50000));
        assert_eq!(res.zakat_due, dec!(1250));
        assert_eq!(res.total_assets, dec!(60000));
        assert!(res.calculation_trace.find("step-silver-exempt").is_some());
    }

    #[test]
    fn test_debts_larger_than_base_are_floored_at_zero() {
        // Base wealth 10,000 minus 60,000 debt is negative; only the stock
        // contribution remains and the total never goes below zero.
        let assets = AssetSnapshot::new().bank_accounts(10_000).stocks(100_000);
        let liabilities = LiabilitySnapshot::new().loans(60_000);
        let options = CalculationOptions::new().stock_treatment(StockTreatment::Quarter);
        let res = compute(&assets, &liabilities, &options);

        assert_eq!(res.net_worth, dec!(50000));
        assert!(res.meets_nisab);
        assert_eq!(res.stock_zakat, dec!(625));
        assert_eq!(res.zakat_due, Decimal::ZERO);
    }

    #[test]
    fn test_negative_net_worth_fails_nisab() {
        let assets = AssetSnapshot::new().cash(1_000);
        let liabilities = LiabilitySnapshot::new().debts(5_000);
        let config = ZakatConfig::builder().silver_price(0).build().unwrap();
        let res = compute_with_config(&config, &assets, &liabilities, &CalculationOptions::new());

        assert_eq!(res.nisab_threshold, Decimal::ZERO);
        assert_eq!(res.net_worth, dec!(-4000));
        assert!(!res.meets_nisab);
        assert_eq!(res.zakat_due, Decimal::ZERO);
    }

    #[test]
    fn test_gold_basis_threshold() {
        let assets = AssetSnapshot::new().bank_accounts(40_000);
        let silver = compute(&assets, &no_liabilities(), &CalculationOptions::new());
        let gold = compute(&assets, &no_liabilities(), &CalculationOptions::new().nisab_basis(NisabBasis::Gold));

        assert!(silver.meets_nisab);
        assert_eq!(gold.nisab_threshold, dec!(48114));
        assert!(!gold.meets_nisab);
        assert_eq!(gold.zakat_due, Decimal::ZERO);
    }

    #[test]
    fn test_huge_inputs_do_not_panic() {
        let assets = AssetSnapshot::new()
            .cash(Decimal::MAX)
            .bank_accounts(Decimal::MAX)
            .stocks(Decimal::MAX);
        let res = compute(&assets, &no_liabilities(), &CalculationOptions::new().stock_treatment(StockTreatment::Cash));
        assert!(res.meets_nisab);
        assert_eq!(res.total_assets, Decimal::MAX);
        assert!(res.zakat_due > Decimal::ZERO);
    }

    #[test]
    fn test_trace_ends_with_zakat_due() {
        let assets = AssetSnapshot::new().bank_accounts(700_000);
        let res = compute(&assets, &no_liabilities(), &CalculationOptions::new());
        let last = res.calculation_trace.steps().last().unwrap();
        assert_eq!(last.step_key, "step-zakat-due");
        assert_eq!(last.amount, Some(dec!(17500)));
    }
}
