//! Net balance derivations over aggregate sums supplied by the ledger.

use crate::core::ledger::{MonthlyBalance, PeriodKey};
use rust_decimal::Decimal;

/// Net balance of one period. Absent sums are passed in as zero.
pub fn compute_monthly_balance(
    period: &PeriodKey,
    income_sum: Decimal,
    spend_sum: Decimal,
) -> MonthlyBalance {
    MonthlyBalance {
        period: period.clone(),
        balance: income_sum - spend_sum,
    }
}

/// All-time income minus all-time spending.
pub fn compute_running_balance(total_income: Decimal, total_spend: Decimal) -> Decimal {
    total_income - total_spend
}
