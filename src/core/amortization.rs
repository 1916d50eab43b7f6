//! Fixed-rate loan payoff simulation with monthly compounding.
//!
//! The schedule is produced by stepping through the loan one month at a
//! time rather than from a closed-form annuity formula, so callers get the
//! outstanding balance and the interest charged for every month.
use crate::core::error::LoanError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Upper bound on simulated months (1 000 years). Hitting it is reported
/// as [`LoanError::PaymentTooLow`].
pub const MAX_SCHEDULE_MONTHS: u32 = 12_000;

/// Validated input of a single payoff calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Decimal,
    pub annual_rate_percent: Decimal,
    pub monthly_payment: Decimal,
}

impl LoanTerms {
    /// Rejects a non-positive principal or payment and a negative rate.
    pub fn new(
        principal: Decimal,
        annual_rate_percent: Decimal,
        monthly_payment: Decimal,
    ) -> Result<Self, LoanError> {
        if principal <= Decimal::ZERO {
            return Err(LoanError::InvalidTerms {
                field: "principal",
                expected: "positive",
                value: principal,
            });
        }
        if annual_rate_percent < Decimal::ZERO {
            return Err(LoanError::InvalidTerms {
                field: "annual rate",
                expected: "non-negative",
                value: annual_rate_percent,
            });
        }
        if monthly_payment <= Decimal::ZERO {
            return Err(LoanError::InvalidTerms {
                field: "monthly payment",
                expected: "positive",
                value: monthly_payment,
            });
        }

        Ok(Self {
            principal,
            annual_rate_percent,
            monthly_payment,
        })
    }

    /// Annual percentage converted to a monthly fraction, e.g. 12 -> 0.01.
    pub fn monthly_rate(&self) -> Decimal {
        self.annual_rate_percent / Decimal::ONE_HUNDRED / Decimal::from(12)
    }

    /// Simulates the loan month by month until the balance reaches zero.
    ///
    /// The payment is checked against the interest of every month. On the
    /// final month only the amount needed to clear the balance counts
    /// toward `total_paid`. No rounding is applied.
    pub fn schedule(&self) -> Result<AmortizationResult, LoanError> {
        let monthly_rate = self.monthly_rate();
        let mut remaining = self.principal;
        let mut month: u32 = 0;
        let mut total_paid = Decimal::ZERO;
        let mut monthly_balances = Vec::new();
        let mut monthly_interest = Vec::new();

        while remaining > Decimal::ZERO {
            // An interest charge past Decimal::MAX is larger than any payment.
            let interest = remaining.checked_mul(monthly_rate).unwrap_or(Decimal::MAX);
            if self.monthly_payment <= interest || month >= MAX_SCHEDULE_MONTHS {
                return Err(LoanError::PaymentTooLow {
                    month: month + 1,
                    payment: self.monthly_payment,
                    interest,
                });
            }

            let overflow = || LoanError::AmountOverflow { month: month + 1 };
            remaining = remaining
                .checked_sub(self.monthly_payment - interest)
                .ok_or_else(overflow)?;

            let mut payment = self.monthly_payment;
            if remaining < Decimal::ZERO {
                payment = payment.checked_add(remaining).ok_or_else(overflow)?;
                remaining = Decimal::ZERO;
            }

            total_paid = total_paid.checked_add(payment).ok_or_else(overflow)?;
            month += 1;
            monthly_balances.push(remaining.max(Decimal::ZERO));
            monthly_interest.push(interest);
        }

        Ok(AmortizationResult {
            total_months: month,
            total_paid,
            monthly_balances,
            monthly_interest,
        })
    }
}

/// Month-by-month payoff trace. `monthly_balances[i]` is the balance left
/// after payment `i + 1` and `monthly_interest[i]` the interest charged
/// in that month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub total_months: u32,
    pub total_paid: Decimal,
    pub monthly_balances: Vec<Decimal>,
    pub monthly_interest: Vec<Decimal>,
}

impl AmortizationResult {
    /// Sum of all monthly interest charges.
    pub fn total_interest_charged(&self) -> Decimal {
        self.monthly_interest.iter().sum()
    }
}

/// Validates the terms and runs [`LoanTerms::schedule`].
pub fn compute_schedule(
    principal: Decimal,
    annual_rate_percent: Decimal,
    monthly_payment: Decimal,
) -> Result<AmortizationResult, LoanError> {
    LoanTerms::new(principal, annual_rate_percent, monthly_payment)?.schedule()
}

/// Months needed to save up `principal` at `monthly_payment` per month,
/// undiscounted.
pub fn months_to_save(principal: Decimal, monthly_payment: Decimal) -> Decimal {
    principal / monthly_payment
}

/// Amount paid on top of the principal over the life of the loan.
pub fn interest_paid(principal: Decimal, result: &AmortizationResult) -> Decimal {
    result.total_paid - principal
}
