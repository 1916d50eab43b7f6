//! Core business logic: calculations, ledger abstractions and configuration

pub mod amortization;
pub mod balance;
pub mod config;
pub mod error;
pub mod ledger;
pub mod log;
pub mod tracker;

// Re-export main types for cleaner imports
pub use amortization::{AmortizationResult, LoanTerms, compute_schedule};
pub use balance::{compute_monthly_balance, compute_running_balance};
pub use error::{LedgerError, LoanError};
pub use ledger::{EntryKind, LedgerStore, MonthlyBalance, PeriodKey, Transaction};
