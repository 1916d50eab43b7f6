//! Error types for the calculation core and ledger input.

use rust_decimal::Decimal;
use thiserror::Error;

/// Failures of the loan amortization engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanError {
    /// Terms rejected before the simulation starts.
    #[error("Invalid loan terms: {field} must be {expected}, got {value}")]
    InvalidTerms {
        field: &'static str,
        expected: &'static str,
        value: Decimal,
    },

    /// The payment does not exceed the interest charged for a month, so
    /// the balance never goes down.
    #[error(
        "Monthly payment {payment} is too low to cover interest {interest} in month {month}; the loan cannot be repaid"
    )]
    PaymentTooLow {
        month: u32,
        payment: Decimal,
        interest: Decimal,
    },

    /// A running amount left the representable decimal range.
    #[error("Loan amounts overflowed in month {month}")]
    AmountOverflow { month: u32 },
}

/// Invalid input destined for the ledger.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidPeriod(String),

    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("Ledger total overflowed")]
    TotalOverflow,
}
