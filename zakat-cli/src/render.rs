//! Human-readable output for the terminal.

use colored::Colorize;
use rust_decimal::Decimal;
use std::collections::HashMap;
use strum::IntoEnumIterator;
use tabled::{builder::Builder, settings::Style, Table};

use zakat_engine::prelude::*;

/// Builds the figures table plus a colored status line for `result`.
pub fn result_report(result: &ZakatResult, translator: &Translator, locale: ZakatLocale) -> String {
    let money = |amount: Decimal| format_currency_as(amount, locale, &result.currency_code);
    let label = |key: &str| translator.translate(locale, key, None);

    let mut builder = Builder::default();
    let rows = [
        ("result-total-assets", result.total_assets),
        ("result-total-liabilities", result.total_liabilities),
        ("result-deductible-liabilities", result.deductible_liabilities),
        ("result-zakatable-wealth", result.zakatable_wealth),
        ("result-net-worth", result.net_worth),
        ("result-nisab-threshold", result.nisab_threshold),
        ("result-stock-zakat", result.stock_zakat),
        ("result-zakat-due", result.zakat_due),
    ];
    for (key, amount) in rows {
        builder.push_record([label(key), money(amount)]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());

    let status = if result.meets_nisab {
        label("status-payable").green().bold().to_string()
    } else {
        let mut args = HashMap::new();
        args.insert("threshold".to_string(), money(result.nisab_threshold));
        translator
            .translate_with_args(locale, "status-below-nisab", &args)
            .yellow()
            .to_string()
    };

    let rules = result.options.madhab.rules();
    let rules_text = translator.translate_or(locale, rules.description_key, rules.description);

    let mut out = String::new();
    if let Some(name) = &result.label {
        out.push_str(&format!("{}\n", name.bold()));
    }
    out.push_str(&format!("{}\n{}\n{}", table, status, rules_text.dimmed()));
    out
}

/// Tabulates the deduction and jewelry policy of every Madhab.
pub fn rules_table(translator: &Translator, locale: ZakatLocale) -> Table {
    let yes_no = |b: bool| if b { "yes" } else { "no" };

    let mut builder = Builder::default();
    builder.push_record(["madhab", "debts", "loans", "other", "jewelry always", "description"]);
    for madhab in Madhab::iter() {
        let rules = madhab.rules();
        builder.push_record([
            madhab.to_string(),
            yes_no(rules.deduct_debts).to_string(),
            yes_no(rules.deduct_loans).to_string(),
            yes_no(rules.deduct_other).to_string(),
            yes_no(rules.jewelry_always_zakatable).to_string(),
            translator.translate_or(locale, rules.description_key, rules.description),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_lists_every_figure() {
        colored::control::set_override(false);
        let result = compute(
            &AssetSnapshot::new().bank_accounts(700_000),
            &LiabilitySnapshot::new(),
            &CalculationOptions::new(),
        )
        .with_label("Household");

        let report = result_report(&result, translator(), ZakatLocale::EnUS);
        assert!(report.starts_with("Household"));
        assert!(report.contains("Zakat Due"));
        assert!(report.contains("DKK 17,500.00"), "{report}");
        assert!(report.contains("DKK 4,286.52"));
    }

    #[test]
    fn test_report_uses_result_currency() {
        colored::control::set_override(false);
        let config = ZakatConfig::builder().currency_code("EUR").build().unwrap();
        let result = compute_with_config(
            &config,
            &AssetSnapshot::new().cash(100_000),
            &LiabilitySnapshot::new(),
            &CalculationOptions::new(),
        );

        let report = result_report(&result, translator(), ZakatLocale::DaDK);
        assert!(report.contains("2.500,00 EUR"), "{report}");
        assert!(!report.contains("kr."));
    }

    #[test]
    fn test_rules_table_has_a_row_per_madhab() {
        let rendered = rules_table(translator(), ZakatLocale::EnUS).to_string();
        for madhab in Madhab::iter() {
            assert!(rendered.contains(&madhab.to_string()));
        }
    }
}
