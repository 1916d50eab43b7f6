pub mod cli;
pub mod core;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::ledger::PeriodKey;
use anyhow::Result;
use rust_decimal::Decimal;
use tracing::{debug, info};

pub enum AppCommand {
    AddIncome {
        period: PeriodKey,
        amount: Decimal,
    },
    AddSpend {
        period: PeriodKey,
        category: String,
        amount: Decimal,
    },
    Show,
    Spending {
        period: PeriodKey,
    },
    Income,
    Rebuild,
    Seed,
    Loan {
        principal: Decimal,
        rate: Decimal,
        payment: Decimal,
        schedule: bool,
    },
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fintrack starting...");

    // The calculator is pure and works without a config file.
    if let AppCommand::Loan {
        principal,
        rate,
        payment,
        schedule,
    } = command
    {
        let currency = match config_path {
            Some(_) => load_config(config_path)?.currency,
            None => AppConfig::load_or_default()?.currency,
        };
        return cli::loan::run(principal, rate, payment, schedule, &currency);
    }

    let config = load_config(config_path)?;
    let store = store::open_ledger(&config)?;
    let store = store.as_ref();
    let currency = config.currency.as_str();

    match command {
        AppCommand::AddIncome { period, amount } => {
            cli::record::income(store, &period, amount, currency).await
        }
        AppCommand::AddSpend {
            period,
            category,
            amount,
        } => cli::record::spend(store, &period, &category, amount, currency).await,
        AppCommand::Show => cli::show::run(store, currency).await,
        AppCommand::Spending { period } => cli::spending::run(store, &period, currency).await,
        AppCommand::Income => cli::spending::income(store, currency).await,
        AppCommand::Rebuild => cli::record::rebuild(store).await,
        AppCommand::Seed => cli::record::seed(store).await,
        AppCommand::Loan { .. } => {
            unreachable!("Loan command is handled before opening the ledger")
        }
    }
}
