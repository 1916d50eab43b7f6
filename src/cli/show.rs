use super::ui;
use crate::core::ledger::{EntryKind, LedgerStore, MonthlyBalance, Transaction};
use crate::core::tracker;
use anyhow::Result;
use comfy_table::Cell;
use rust_decimal::Decimal;

pub fn income_table(transactions: &[Transaction], currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Month"), ui::header_cell("Amount")]);
    for tx in transactions {
        table.add_row(vec![
            Cell::new(tx.period().as_str()),
            ui::amount_cell(tx.amount(), currency),
        ]);
    }
    table.to_string()
}

pub fn spend_table(transactions: &[Transaction], currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Month"),
        ui::header_cell("Category"),
        ui::header_cell("Amount"),
    ]);
    for tx in transactions {
        table.add_row(vec![
            Cell::new(tx.period().as_str()),
            Cell::new(tx.category().unwrap_or_default()),
            ui::amount_cell(tx.amount(), currency),
        ]);
    }
    table.to_string()
}

pub fn balance_table(balances: &[MonthlyBalance], currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Month"), ui::header_cell("Balance")]);
    for balance in balances {
        table.add_row(vec![
            Cell::new(balance.period.as_str()),
            ui::balance_cell(balance.balance, currency),
        ]);
    }
    table.to_string()
}

pub fn running_balance_line(running: Decimal, currency: &str) -> String {
    let style_type = if running.is_sign_negative() && !running.is_zero() {
        ui::StyleType::Error
    } else {
        ui::StyleType::TotalValue
    };
    format!(
        "{} {}",
        ui::style_text("Running Balance:", ui::StyleType::TotalLabel),
        ui::style_text(&ui::format_amount(running, currency), style_type)
    )
}

fn print_section(title: &str, is_empty: bool, table: String) {
    println!("{}\n", ui::style_text(title, ui::StyleType::Title));
    if is_empty {
        ui::print_empty("No data found.");
    } else {
        println!("{table}");
    }
}

/// Prints every income and spend record, the stored monthly balances and
/// the all-time running balance.
pub async fn run(store: &dyn LedgerStore, currency: &str) -> Result<()> {
    let income = store.list_transactions(EntryKind::Income, None).await?;
    let spend = store.list_transactions(EntryKind::Spend, None).await?;
    let balances = store.monthly_balances().await?;
    let running = tracker::running_balance(store).await?;

    print_section("Income", income.is_empty(), income_table(&income, currency));
    ui::print_separator();
    print_section("Spending", spend.is_empty(), spend_table(&spend, currency));
    ui::print_separator();
    print_section(
        "Monthly Balance",
        balances.is_empty(),
        balance_table(&balances, currency),
    );

    println!("\n{}", running_balance_line(running, currency));
    Ok(())
}
