use super::ui;
use crate::core::ledger::{LedgerStore, MonthlyBalance, PeriodKey};
use crate::core::tracker;
use anyhow::Result;
use rust_decimal::Decimal;

fn balance_line(balance: &MonthlyBalance, currency: &str) -> String {
    format!(
        "Balance for {}: {}",
        ui::style_text(balance.period.as_str(), ui::StyleType::TotalLabel),
        ui::format_amount(balance.balance, currency)
    )
}

pub async fn income(
    store: &dyn LedgerStore,
    period: &PeriodKey,
    amount: Decimal,
    currency: &str,
) -> Result<()> {
    let balance = tracker::record_income(store, period, amount).await?;
    println!(
        "Added income of {} for {period}",
        ui::format_amount(amount, currency)
    );
    println!("{}", balance_line(&balance, currency));
    Ok(())
}

pub async fn spend(
    store: &dyn LedgerStore,
    period: &PeriodKey,
    category: &str,
    amount: Decimal,
    currency: &str,
) -> Result<()> {
    let balance = tracker::record_spend(store, period, category, amount).await?;
    println!(
        "Added {category} spend of {} for {period}",
        ui::format_amount(amount, currency)
    );
    println!("{}", balance_line(&balance, currency));
    Ok(())
}

pub async fn rebuild(store: &dyn LedgerStore) -> Result<()> {
    let count = tracker::rebuild_monthly_balances(store).await?;
    println!("Recomputed balances for {count} month(s)");
    Ok(())
}

pub async fn seed(store: &dyn LedgerStore) -> Result<()> {
    let count = tracker::seed_sample_data(store).await?;
    println!("Loaded sample data covering {count} month(s)");
    Ok(())
}
