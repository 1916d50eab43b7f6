//! Ledger records and the storage abstraction they live behind.

use crate::core::error::LedgerError;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

/// A calendar month in `YYYY-MM` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeriodKey(String);

impl PeriodKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PeriodKey {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // chrono accepts unpadded fields, the stored key must not.
        let well_formed = s.len() == 7
            && s.as_bytes()[4] == b'-'
            && NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").is_ok();
        if well_formed {
            Ok(PeriodKey(s.to_string()))
        } else {
            Err(LedgerError::InvalidPeriod(s.to_string()))
        }
    }
}

impl TryFrom<String> for PeriodKey {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PeriodKey> for String {
    fn from(period: PeriodKey) -> Self {
        period.0
    }
}

impl Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which side of the ledger a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Income,
    Spend,
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Income => write!(f, "income"),
            EntryKind::Spend => write!(f, "spend"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transaction {
    Income {
        period: PeriodKey,
        amount: Decimal,
    },
    Spend {
        period: PeriodKey,
        category: String,
        amount: Decimal,
    },
}

impl Transaction {
    pub fn kind(&self) -> EntryKind {
        match self {
            Transaction::Income { .. } => EntryKind::Income,
            Transaction::Spend { .. } => EntryKind::Spend,
        }
    }

    pub fn period(&self) -> &PeriodKey {
        match self {
            Transaction::Income { period, .. } | Transaction::Spend { period, .. } => period,
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Transaction::Income { amount, .. } | Transaction::Spend { amount, .. } => *amount,
        }
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            Transaction::Income { .. } => None,
            Transaction::Spend { category, .. } => Some(category),
        }
    }
}

/// Sums amounts, failing instead of panicking past `Decimal::MAX`.
pub fn checked_total<I>(amounts: I) -> Result<Decimal, LedgerError>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().try_fold(Decimal::ZERO, |total, amount| {
        total.checked_add(amount).ok_or(LedgerError::TotalOverflow)
    })
}

/// Sums amounts per key, ordered by key.
pub fn checked_totals_by<K, I>(entries: I) -> Result<Vec<(K, Decimal)>, LedgerError>
where
    K: Ord,
    I: IntoIterator<Item = (K, Decimal)>,
{
    let mut totals: BTreeMap<K, Decimal> = BTreeMap::new();
    for (key, amount) in entries {
        let total = totals.entry(key).or_default();
        *total = total.checked_add(amount).ok_or(LedgerError::TotalOverflow)?;
    }
    Ok(totals.into_iter().collect())
}

/// Net amount (income minus spend) recorded for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBalance {
    pub period: PeriodKey,
    pub balance: Decimal,
}

/// Transaction storage queried by the tracker.
///
/// Sums over no matching rows are zero, never an error.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn record(&self, tx: Transaction) -> Result<()>;

    async fn sum_amount(&self, kind: EntryKind, period: Option<&PeriodKey>) -> Result<Decimal>;

    /// Distinct periods with at least one income or spend record, ascending.
    async fn list_periods(&self) -> Result<Vec<PeriodKey>>;

    async fn list_transactions(
        &self,
        kind: EntryKind,
        period: Option<&PeriodKey>,
    ) -> Result<Vec<Transaction>>;

    /// Replaces whatever balance was stored for `balance.period`.
    async fn upsert_balance(&self, balance: MonthlyBalance) -> Result<()>;

    async fn monthly_balances(&self) -> Result<Vec<MonthlyBalance>>;

    async fn spending_by_category(&self, period: &PeriodKey) -> Result<Vec<(String, Decimal)>>;

    async fn income_by_period(&self) -> Result<Vec<(PeriodKey, Decimal)>>;
}
