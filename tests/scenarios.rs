use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use zakat_engine::prelude::*;

fn init_logs() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn hanafi_silver() -> CalculationOptions {
    CalculationOptions::new()
        .madhab(Madhab::Hanafi)
        .nisab_basis(NisabBasis::Silver)
}

#[test]
fn test_scenario_a_bank_balance_above_silver_nisab() {
    let assets = AssetSnapshot::new().bank_accounts(700_000);
    let res = compute(&assets, &LiabilitySnapshot::new(), &hanafi_silver());

    assert_eq!(res.nisab_threshold, dec!(4286.52));
    assert_eq!(res.net_worth, dec!(700000));
    assert!(res.meets_nisab);
    assert_eq!(res.zakat_due, dec!(17500));
}

#[test]
fn test_scenario_b_bank_balance_below_silver_nisab() {
    let assets = AssetSnapshot::new().bank_accounts(1_000);
    let res = compute(&assets, &LiabilitySnapshot::new(), &hanafi_silver());

    assert_eq!(res.net_worth, dec!(1000));
    assert!(!res.meets_nisab);
    assert_eq!(res.zakat_due, Decimal::ZERO);
}

#[test]
fn test_scenario_c_quarter_method() {
    let assets = AssetSnapshot::new().stocks(100_000);
    let options = hanafi_silver().stock_treatment(StockTreatment::Quarter);
    let res = compute(&assets, &LiabilitySnapshot::new(), &options);

    assert!(res.meets_nisab);
    assert_eq!(res.stock_zakat, dec!(625));
    assert_eq!(res.zakat_due, dec!(625));
}

#[test]
fn test_scenario_d_amana_method_taxes_gains() {
    let assets = AssetSnapshot::new().stocks(100_000).stock_gains(20_000);
    let options = hanafi_silver().stock_treatment(StockTreatment::Amana);
    let res = compute(&assets, &LiabilitySnapshot::new(), &options);

    assert_eq!(res.stock_zakat, dec!(2000));
    assert_eq!(res.zakat_due, dec!(2000));
    assert_eq!(res.total_assets, dec!(100000));
}

#[test]
fn test_scenario_e_maliki_personal_gold_is_exempt() {
    let assets = AssetSnapshot::new().gold(50_000);
    let options = hanafi_silver()
        .madhab(Madhab::Maliki)
        .gold_purpose(JewelryPurpose::Personal);
    let res = compute(&assets, &LiabilitySnapshot::new(), &options);

    assert_eq!(res.zakatable_wealth, Decimal::ZERO);
    assert_eq!(res.zakat_due, Decimal::ZERO);
    assert!(!res.meets_nisab);
    assert_eq!(res.total_assets, dec!(50000));
}

#[test]
fn test_scenario_f_rental_property_only_in_display_total() {
    let assets = AssetSnapshot::new().property_investment(500_000);
    let options = hanafi_silver().property_intent(PropertyIntent::Rental);
    let res = compute(&assets, &LiabilitySnapshot::new(), &options);

    assert_eq!(res.net_worth, Decimal::ZERO);
    assert_eq!(res.zakatable_wealth, Decimal::ZERO);
    assert_eq!(res.total_assets, dec!(500000));
    assert_eq!(res.zakat_due, Decimal::ZERO);
}

#[test]
fn test_resale_property_is_zakatable() {
    let assets = AssetSnapshot::new().property_investment(500_000);
    let options = hanafi_silver().property_intent(PropertyIntent::Resale);
    let res = compute(&assets, &LiabilitySnapshot::new(), &options);

    assert_eq!(res.net_worth, dec!(500000));
    assert_eq!(res.zakat_due, dec!(12500));
}

#[test]
fn test_mixed_household_declaration() {
    init_logs();
    // Raw text as typed into the form.
    let assets = AssetSnapshot::from_raw([
        (AssetCategory::Cash, "5.000"),
        (AssetCategory::BankAccounts, "120.000,50"),
        (AssetCategory::Gold, "30.000"),
        (AssetCategory::Stocks, "80.000"),
        (AssetCategory::StockGains, "8.000"),
        (AssetCategory::OtherInvestments, "10.000"),
        (AssetCategory::Receivables, "4.999,50"),
    ]);
    let liabilities = LiabilitySnapshot::from_raw([
        (LiabilityCategory::Debts, "15.000"),
        (LiabilityCategory::Loans, "25.000"),
    ]);
    let options = CalculationOptions::new()
        .madhab(Madhab::Hanbali)
        .gold_purpose(JewelryPurpose::Savings)
        .stock_treatment(StockTreatment::Amana);

    let res = compute(&assets, &liabilities, &options);

    // Base: 5,000 + 120,000.50 + 4,999.50 + 30,000 gold = 160,000
    // Zakatable: 160,000 + 10,000 crypto = 170,000
    assert_eq!(res.zakatable_wealth, dec!(170000));
    assert_eq!(res.deductible_liabilities, dec!(40000));
    // Net worth: 170,000 + 80,000 stocks - 40,000 = 210,000
    assert_eq!(res.net_worth, dec!(210000));
    // (170,000 - 40,000) * 2.5% = 3,250 plus 8,000 * 10% = 800
    assert_eq!(res.stock_zakat, dec!(800));
    assert_eq!(res.zakat_due, dec!(4050));
    assert_eq!(res.total_assets, dec!(250000));
    assert_eq!(res.total_liabilities, dec!(40000));
}
