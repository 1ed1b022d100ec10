//! # Zakat CLI
//!
//! Command-line front end for `zakat-engine`.
//!
//! ## Usage
//! ```bash
//! # Amounts are typed the Danish way: `.` groups thousands, `,` separates decimals
//! zakat-cli calculate --bank-accounts 700.000 --stocks 100.000 --stock-gains 20.000
//!
//! # Another school, JSON output
//! zakat-cli calculate --cash 50.000 --debts 10.000 --madhab maliki --json
//!
//! # Madhab rule table and JSON Schema
//! zakat-cli rules
//! zakat-cli schema
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, warn};

use zakat_engine::prelude::*;

mod config_loader;
mod render;

use config_loader::CliConfig;

/// Zakat liability calculator
#[derive(Parser, Debug)]
#[command(name = "zakat-cli")]
#[command(author = "zakat-engine contributors")]
#[command(version)]
#[command(about = "Compute Zakat from declared assets and liabilities", long_about = None)]
struct Cli {
    /// Enable file logging to logs/ directory
    #[arg(long, global = true, default_value = "false")]
    log: bool,

    /// Display locale (da-DK or en-US)
    #[arg(long, global = true)]
    locale: Option<ZakatLocale>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the Zakat due for one declaration
    Calculate(CalculateArgs),
    /// Print the debt and jewelry rules of every Madhab
    Rules,
    /// Print the JSON Schema of declarations and results
    Schema,
}

#[derive(Args, Debug)]
struct CalculateArgs {
    /// Label shown in the report
    #[arg(long)]
    label: Option<String>,

    #[arg(long, default_value = "")]
    cash: String,
    #[arg(long, default_value = "")]
    bank_accounts: String,
    /// Market value of gold
    #[arg(long, default_value = "")]
    gold: String,
    /// Market value of silver
    #[arg(long, default_value = "")]
    silver: String,
    #[arg(long, default_value = "")]
    stocks: String,
    /// Realized or unrealized gains, used by the amana method
    #[arg(long, default_value = "")]
    stock_gains: String,
    #[arg(long, default_value = "")]
    business_inventory: String,
    #[arg(long, default_value = "")]
    property_investment: String,
    /// Crypto and other investments
    #[arg(long, default_value = "")]
    other_investments: String,
    #[arg(long, default_value = "")]
    receivables: String,

    #[arg(long, default_value = "")]
    debts: String,
    /// Bank loans and credit-card debt
    #[arg(long, default_value = "")]
    loans: String,
    #[arg(long, default_value = "")]
    other_liabilities: String,

    #[arg(long)]
    madhab: Option<Madhab>,
    #[arg(long)]
    nisab_basis: Option<NisabBasis>,
    #[arg(long)]
    stock_treatment: Option<StockTreatment>,
    #[arg(long)]
    property_intent: Option<PropertyIntent>,
    #[arg(long)]
    gold_purpose: Option<JewelryPurpose>,
    #[arg(long)]
    silver_purpose: Option<JewelryPurpose>,

    /// JSON engine configuration (rates, weights, prices)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output the result as JSON
    #[arg(long, default_value = "false")]
    json: bool,

    /// Print the step-by-step calculation trace
    #[arg(long, default_value = "false")]
    explain: bool,
}

impl CalculateArgs {
    fn declaration(&self, defaults: &CliConfig) -> ZakatDeclaration {
        let assets = AssetSnapshot::from_raw([
            (AssetCategory::Cash, self.cash.as_str()),
            (AssetCategory::BankAccounts, self.bank_accounts.as_str()),
            (AssetCategory::Gold, self.gold.as_str()),
            (AssetCategory::Silver, self.silver.as_str()),
            (AssetCategory::Stocks, self.stocks.as_str()),
            (AssetCategory::StockGains, self.stock_gains.as_str()),
            (AssetCategory::BusinessInventory, self.business_inventory.as_str()),
            (AssetCategory::PropertyInvestment, self.property_investment.as_str()),
            (AssetCategory::OtherInvestments, self.other_investments.as_str()),
            (AssetCategory::Receivables, self.receivables.as_str()),
        ]);
        let liabilities = LiabilitySnapshot::from_raw([
            (LiabilityCategory::Debts, self.debts.as_str()),
            (LiabilityCategory::Loans, self.loans.as_str()),
            (LiabilityCategory::OtherLiabilities, self.other_liabilities.as_str()),
        ]);

        let fallback = CalculationOptions::default();
        let options = CalculationOptions {
            nisab_basis: self.nisab_basis.or(defaults.nisab_basis).unwrap_or(fallback.nisab_basis),
            stock_treatment: self
                .stock_treatment
                .or(defaults.stock_treatment)
                .unwrap_or(fallback.stock_treatment),
            madhab: self.madhab.or(defaults.madhab).unwrap_or(fallback.madhab),
            property_intent: self.property_intent.unwrap_or(fallback.property_intent),
            gold_purpose: self.gold_purpose.unwrap_or(fallback.gold_purpose),
            silver_purpose: self.silver_purpose.unwrap_or(fallback.silver_purpose),
        };

        let declaration = ZakatDeclaration::new(assets, liabilities, options);
        match &self.label {
            Some(label) => declaration.label(label.clone()),
            None => declaration,
        }
    }

    /// Engine configuration: JSON file (or environment) first, then the
    /// persistent CLI defaults on top.
    fn engine_config(&self, defaults: &CliConfig) -> Result<ZakatConfig, ZakatError> {
        let base = match &self.config {
            Some(path) => ZakatConfig::try_from_json(&path.to_string_lossy())?,
            None => ZakatConfig::from_env()?,
        };
        defaults.apply_to(base)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let defaults = CliConfig::load();

    let _file_guard = init_tracing(cli.log || defaults.enable_logging.unwrap_or(false))?;

    let locale = cli.locale.or(defaults.locale).unwrap_or_default();
    match cli.command {
        Commands::Calculate(args) => run_calculate(&args, &defaults, cli.locale),
        Commands::Rules => {
            println!("{}", render::rules_table(translator(), locale));
            Ok(())
        }
        Commands::Schema => run_schema(),
    }
}

/// Installs the subscriber: stderr always, plus a daily-rolling file under
/// `logs/` when requested.
fn init_tracing(
    to_file: bool,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>, Box<dyn std::error::Error>> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(if to_file { "zakat_engine=debug" } else { "warn" }));
    let console = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if !to_file {
        tracing_subscriber::registry().with(env_filter).with(console).init();
        return Ok(None);
    }

    std::fs::create_dir_all("logs")?;
    let file_appender = tracing_appender::rolling::daily("logs", "zakat.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    tracing::info!("--- Zakat Calculation Session Started [{}] ---", chrono::Utc::now());
    Ok(Some(guard))
}

fn run_calculate(
    args: &CalculateArgs,
    defaults: &CliConfig,
    locale_flag: Option<ZakatLocale>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.engine_config(defaults)?;
    let locale = locale_flag.unwrap_or(config.locale);
    let declaration = args.declaration(defaults);

    if declaration.assets.is_empty() {
        warn!("No assets were declared; every amount is zero");
    }
    debug!(options = ?declaration.options, "calculating");

    let result = declaration.calculate_zakat(&config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", render::result_report(&result, translator(), locale));
    if args.explain {
        println!();
        print!("{}", result.explain_in(translator(), locale));
    }
    Ok(())
}

fn run_schema() -> Result<(), Box<dyn std::error::Error>> {
    let schemas = serde_json::json!({
        "declaration": schemars::schema_for!(ZakatDeclaration),
        "result": schemars::schema_for!(ZakatResult),
        "config": schemars::schema_for!(ZakatConfig),
    });
    println!("{}", serde_json::to_string_pretty(&schemas)?);
    Ok(())
}
