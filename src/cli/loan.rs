use super::ui;
use crate::core::amortization::{AmortizationResult, LoanTerms, interest_paid, months_to_save};
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};
use rust_decimal::Decimal;

pub fn summary(terms: &LoanTerms, result: &AmortizationResult, currency: &str) -> String {
    let lines = [
        ("Loan Amount", ui::format_amount(terms.principal, currency)),
        (
            "Interest Rate",
            format!("{:.2}%", terms.annual_rate_percent.round_dp(2)),
        ),
        (
            "Monthly Payment",
            ui::format_amount(terms.monthly_payment, currency),
        ),
        ("Time to Pay Off", format!("{} months", result.total_months)),
        ("Total Paid", ui::format_amount(result.total_paid, currency)),
        (
            "Total Interest Paid",
            ui::format_amount(interest_paid(terms.principal, result), currency),
        ),
        (
            "Time to Save for Purchase",
            format!(
                "{:.2} months",
                months_to_save(terms.principal, terms.monthly_payment).round_dp(2)
            ),
        ),
    ];

    lines
        .iter()
        .map(|(label, value)| {
            format!(
                "{} {value}",
                ui::style_text(&format!("{label}:"), ui::StyleType::TotalLabel)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn schedule_table(result: &AmortizationResult, currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Month"),
        ui::header_cell("Interest"),
        ui::header_cell("Balance"),
    ]);
    for (i, (balance, interest)) in result
        .monthly_balances
        .iter()
        .zip(&result.monthly_interest)
        .enumerate()
    {
        table.add_row(vec![
            Cell::new(i + 1).set_alignment(CellAlignment::Right),
            ui::amount_cell(*interest, currency),
            ui::amount_cell(*balance, currency),
        ]);
    }
    table.to_string()
}

pub fn run(
    principal: Decimal,
    annual_rate_percent: Decimal,
    monthly_payment: Decimal,
    show_schedule: bool,
    currency: &str,
) -> Result<()> {
    let terms = LoanTerms::new(principal, annual_rate_percent, monthly_payment)?;
    let result = terms.schedule()?;

    println!("{}", summary(&terms, &result, currency));
    if show_schedule {
        ui::print_separator();
        println!("{}", schedule_table(&result, currency));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoanError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_lines() {
        let terms = LoanTerms::new(dec!(2200), dec!(12), dec!(50)).unwrap();
        let result = terms.schedule().unwrap();

        let text = console::strip_ansi_codes(&summary(&terms, &result, "$")).to_string();
        assert!(text.contains("Loan Amount: $2200.00"));
        assert!(text.contains("Interest Rate: 12.00%"));
        assert!(text.contains("Time to Pay Off: 59 months"));
        assert!(text.contains("Total Paid: $2913.61"));
        assert!(text.contains("Total Interest Paid: $713.61"));
        assert!(text.contains("Time to Save for Purchase: 44.00 months"));
    }

    #[test]
    fn test_schedule_table_rows() {
        let terms = LoanTerms::new(dec!(1200), dec!(0), dec!(400)).unwrap();
        let result = terms.schedule().unwrap();

        let table = schedule_table(&result, "$");
        assert!(table.contains("$800.00"));
        assert!(table.contains("$400.00"));
        assert!(table.contains("$0.00"));
    }

    #[test]
    fn test_run_surfaces_engine_errors() {
        let err = run(dec!(1000), dec!(12), dec!(10), false, "$").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoanError>(),
            Some(LoanError::PaymentTooLow { .. })
        ));

        let err = run(dec!(0), dec!(12), dec!(10), false, "$").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoanError>(),
            Some(LoanError::InvalidTerms { .. })
        ));
    }
}
