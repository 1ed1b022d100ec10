use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use zakat_engine::prelude::*;

#[test]
fn test_trace_serialization() {
    let trace = CalculationTrace(vec![
        CalculationStep::initial("step-initial", "Initial Step", 100),
        CalculationStep::add("step-added", "Added Value", 50),
        CalculationStep::rate("step-rate", "Rate Applied", 0.025),
        CalculationStep::info("step-note", "Just a note"),
    ]);

    let json = serde_json::to_string(&trace).unwrap();

    assert!(json.contains(r#""operation":"initial""#), "{json}");
    assert!(json.contains(r#""operation":"add""#));
    assert!(json.contains(r#""operation":"rate""#));
    assert!(json.contains(r#""operation":"info""#));
    assert!(json.contains(r#""amount":"100""#));
    assert!(json.contains(r#""stepKey":"step-initial""#));
    assert!(json.contains(r#""amount":null"#));
}

#[test]
fn test_result_serializes_camel_case() {
    let assets = AssetSnapshot::new().bank_accounts(700_000);
    let res = compute(&assets, &LiabilitySnapshot::new(), &CalculationOptions::new());
    let json = serde_json::to_value(&res).unwrap();

    let due: Decimal = json["zakatDue"].as_str().unwrap().parse().unwrap();
    assert_eq!(due, dec!(17500));
    assert_eq!(json["meetsNisab"], true);
    assert_eq!(json["options"]["madhab"], "hanafi");
    assert_eq!(json["options"]["stockTreatment"], "amana");
    assert!(json["calculationTrace"].is_array());
}

#[test]
fn test_trace_ends_with_outcome() {
    let payable = compute(
        &AssetSnapshot::new().cash(100_000),
        &LiabilitySnapshot::new(),
        &CalculationOptions::new(),
    );
    let last = payable.calculation_trace.steps().last().unwrap();
    assert_eq!(last.step_key, "step-zakat-due");
    assert_eq!(last.operation, Operation::Result);
    assert_eq!(last.amount, Some(dec!(2500)));

    let exempt = compute(
        &AssetSnapshot::new().cash(100),
        &LiabilitySnapshot::new(),
        &CalculationOptions::new(),
    );
    let last = exempt.calculation_trace.steps().last().unwrap();
    assert_eq!(last.step_key, "step-below-nisab");
    assert_eq!(last.operation, Operation::Info);
    assert!(exempt.calculation_trace.find("step-zakat-due").is_none());
}

#[test]
fn test_trace_notes_exemptions() {
    let assets = AssetSnapshot::new().cash(10_000).gold(40_000).property_investment(300_000);
    let liabilities = LiabilitySnapshot::new().debts(5_000);
    let options = CalculationOptions::new()
        .madhab(Madhab::Maliki)
        .property_intent(PropertyIntent::Rental);
    let res = compute(&assets, &liabilities, &options);

    let trace = &res.calculation_trace;
    assert!(trace.find("step-gold-exempt").is_some());
    assert!(trace.find("step-property-rental").is_some());
    assert!(trace.find("step-no-deduction").is_some());
    assert!(trace.find("step-zakatable-gold").is_none());
}

#[test]
fn test_base_zakat_only_in_trace() {
    let assets = AssetSnapshot::new().bank_accounts(100_000).stocks(40_000);
    let options = CalculationOptions::new().stock_treatment(StockTreatment::Cash);
    let res = compute(&assets, &LiabilitySnapshot::new(), &options);

    let base = res.calculation_trace.find("step-base-zakat").unwrap();
    assert_eq!(base.amount, Some(dec!(2500)));
    assert_eq!(res.stock_zakat, dec!(1000));
    assert_eq!(res.zakat_due, dec!(3500));
}

#[test]
fn test_explain_output() {
    let res = compute(
        &AssetSnapshot::new().bank_accounts(700_000),
        &LiabilitySnapshot::new(),
        &CalculationOptions::new(),
    )
    .with_label("Household 2026");

    let text = res.explain();
    assert!(text.starts_with("Explanation for 'Household 2026' (hanafi, silver, amana):"), "{text}");
    assert!(text.contains("Status: PAYABLE"));
    assert!(text.contains("17500.00"));

    let danish = res.explain_in(translator(), ZakatLocale::DaDK);
    assert!(danish.contains("17.500,00 kr."), "{danish}");
    assert!(danish.contains("Zakat at betale"));
}

#[test]
fn test_explain_unknown_step_falls_back_to_description() {
    let mut res = compute(&AssetSnapshot::new(), &LiabilitySnapshot::new(), &CalculationOptions::new());
    res.calculation_trace
        .push(CalculationStep::info("step-custom-note", "Reviewed by the household"));

    let text = res.explain_in(translator(), ZakatLocale::EnUS);
    assert!(text.contains("INFO: Reviewed by the household"), "{text}");
    assert!(text.contains("Status: EXEMPT"));
}

#[test]
fn test_summary_and_display() {
    let res = compute(&AssetSnapshot::new().cash(100_000), &LiabilitySnapshot::new(), &CalculationOptions::new());
    assert_eq!(res.summary(), "Declaration: Payable - Due: 2500.00");

    let shown = res.to_string();
    assert!(shown.contains("Status: PAYABLE (2500.00 due)"), "{shown}");
}

#[test]
fn test_explain_in_translates_every_line() {
    let payable = compute(
        &AssetSnapshot::new().bank_accounts(700_000),
        &LiabilitySnapshot::new(),
        &CalculationOptions::new(),
    )
    .with_label("Husstand");

    let danish = payable.explain_in(translator(), ZakatLocale::DaDK);
    assert!(danish.starts_with("Forklaring for 'Husstand' (hanafi, silver, amana):"), "{danish}");
    assert!(danish.contains("Status: ZAKATPLIGTIG"));
    assert!(danish.contains("Beløb at betale: 17.500,00 kr."));
    assert!(danish.contains("0,025"));
    assert!(!danish.contains("0.025"));
    assert!(!danish.contains("Status: PAYABLE"));

    let exempt = compute(&AssetSnapshot::new().cash(100), &LiabilitySnapshot::new(), &CalculationOptions::new());
    let danish = exempt.explain_in(translator(), ZakatLocale::DaDK);
    assert!(danish.starts_with("Forklaring for 'Opgørelse'"), "{danish}");
    assert!(danish.contains("Status: FRITAGET"));
    assert!(danish.contains("Årsag: Nettoformuen er under nisab-tærsklen"));
}

#[test]
fn test_configured_currency_reaches_output() {
    let config = ZakatConfig::builder().currency_code("EUR").build().unwrap();
    let res = compute_with_config(
        &config,
        &AssetSnapshot::new().cash(100_000),
        &LiabilitySnapshot::new(),
        &CalculationOptions::new(),
    );

    assert_eq!(res.currency_code, "EUR");
    let danish = res.explain_in(translator(), ZakatLocale::DaDK);
    assert!(danish.contains("2.500,00 EUR"), "{danish}");
    assert!(!danish.contains("kr."));

    let english = res.explain_in(translator(), ZakatLocale::EnUS);
    assert!(english.contains("Amount Due: EUR 2,500.00"), "{english}");

    let json = serde_json::to_value(&res).unwrap();
    assert_eq!(json["currencyCode"], "EUR");
}
