use super::ui;
use crate::core::ledger::{LedgerStore, PeriodKey};
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};
use rust_decimal::Decimal;

/// Category breakdown of one month with each category's share of the total.
pub fn category_table(
    period: &PeriodKey,
    categories: &[(String, Decimal)],
    currency: &str,
) -> String {
    let total: Decimal = categories.iter().map(|(_, amount)| *amount).sum();

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell("Amount"),
        ui::header_cell("Share (%)"),
    ]);
    for (category, amount) in categories {
        let share = if total.is_zero() {
            Decimal::ZERO
        } else {
            *amount / total * Decimal::ONE_HUNDRED
        };
        table.add_row(vec![
            Cell::new(category),
            ui::amount_cell(*amount, currency),
            Cell::new(format!("{:.2}%", share.round_dp(2))).set_alignment(CellAlignment::Right),
        ]);
    }

    format!(
        "Spending for {}\n\n{}\n\n{} {}",
        ui::style_text(period.as_str(), ui::StyleType::Title),
        table,
        ui::style_text("Total:", ui::StyleType::TotalLabel),
        ui::style_text(&ui::format_amount(total, currency), ui::StyleType::TotalValue)
    )
}

pub async fn run(store: &dyn LedgerStore, period: &PeriodKey, currency: &str) -> Result<()> {
    let categories = store.spending_by_category(period).await?;
    if categories.is_empty() {
        println!("No spending data found for {period}.");
        return Ok(());
    }
    println!("{}", category_table(period, &categories, currency));
    Ok(())
}

pub async fn income(store: &dyn LedgerStore, currency: &str) -> Result<()> {
    let totals = store.income_by_period().await?;
    if totals.is_empty() {
        ui::print_empty("No income recorded.");
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Month"), ui::header_cell("Income")]);
    for (period, amount) in &totals {
        table.add_row(vec![
            Cell::new(period.as_str()),
            ui::amount_cell(*amount, currency),
        ]);
    }
    println!("{}\n\n{table}", ui::style_text("Monthly Income", ui::StyleType::Title));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_category_table_shares() {
        let period: PeriodKey = "2024-09".parse().unwrap();
        let categories = vec![
            ("entertainment".to_string(), dec!(150)),
            ("groceries".to_string(), dec!(200)),
            ("utilities".to_string(), dec!(300)),
        ];

        let rendered =
            console::strip_ansi_codes(&category_table(&period, &categories, "$")).to_string();
        assert!(rendered.contains("Spending for 2024-09"));
        assert!(rendered.contains("23.08%"));
        assert!(rendered.contains("30.77%"));
        assert!(rendered.contains("46.15%"));
        assert!(rendered.contains("Total: $650.00"));
    }
}
