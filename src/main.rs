use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fintrack::core::ledger::PeriodKey;
use fintrack::core::log::init_logging;
use rust_decimal::Decimal;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fintrack::AppCommand {
    fn from(cmd: Commands) -> fintrack::AppCommand {
        match cmd {
            Commands::AddIncome { period, amount } => {
                fintrack::AppCommand::AddIncome { period, amount }
            }
            Commands::AddSpend {
                period,
                category,
                amount,
            } => fintrack::AppCommand::AddSpend {
                period,
                category,
                amount,
            },
            Commands::Show => fintrack::AppCommand::Show,
            Commands::Spending { period } => fintrack::AppCommand::Spending { period },
            Commands::Income => fintrack::AppCommand::Income,
            Commands::Rebuild => fintrack::AppCommand::Rebuild,
            Commands::Seed => fintrack::AppCommand::Seed,
            Commands::Loan {
                principal,
                rate,
                payment,
                schedule,
            } => fintrack::AppCommand::Loan {
                principal,
                rate,
                payment,
                schedule,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Record income for a month
    AddIncome {
        /// Month in YYYY-MM format
        period: PeriodKey,
        amount: Decimal,
    },
    /// Record spending for a month
    AddSpend {
        /// Month in YYYY-MM format
        period: PeriodKey,
        category: String,
        amount: Decimal,
    },
    /// Display income, spending and monthly balances
    Show,
    /// Display spending per category for a month
    Spending {
        /// Month in YYYY-MM format
        period: PeriodKey,
    },
    /// Display total income per month
    Income,
    /// Recompute every monthly balance from the recorded transactions
    Rebuild,
    /// Load sample transactions
    Seed,
    /// Calculate how long a loan takes to pay off
    Loan {
        /// Amount borrowed
        #[arg(short, long)]
        principal: Decimal,
        /// Annual interest rate in percent
        #[arg(short, long)]
        rate: Decimal,
        /// Planned monthly payment
        #[arg(short = 'm', long)]
        payment: Decimal,
        /// Print the month-by-month schedule
        #[arg(short, long)]
        schedule: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fintrack::cli::setup::setup(),
        Some(cmd) => fintrack::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
