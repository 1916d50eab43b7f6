use crate::core::ledger::{
    EntryKind, LedgerStore, MonthlyBalance, PeriodKey, Transaction, checked_total,
    checked_totals_by,
};
use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Default)]
struct LedgerTables {
    income: Vec<Transaction>,
    spend: Vec<Transaction>,
    balances: BTreeMap<PeriodKey, Decimal>,
}

impl LedgerTables {
    fn table(&self, kind: EntryKind) -> &[Transaction] {
        match kind {
            EntryKind::Income => &self.income,
            EntryKind::Spend => &self.spend,
        }
    }

    fn matching(&self, kind: EntryKind, period: Option<&PeriodKey>) -> Vec<Transaction> {
        self.table(kind)
            .iter()
            .filter(|tx| period.is_none_or(|p| tx.period() == p))
            .cloned()
            .collect()
    }
}

/// In-memory ledger, lost when dropped.
#[derive(Clone, Default)]
pub struct MemoryLedger {
    inner: Arc<Mutex<LedgerTables>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedger {
    async fn record(&self, tx: Transaction) -> Result<()> {
        let mut tables = self.inner.lock().await;
        debug!(kind = %tx.kind(), period = %tx.period(), "Ledger RECORD");
        match tx.kind() {
            EntryKind::Income => tables.income.push(tx),
            EntryKind::Spend => tables.spend.push(tx),
        }
        Ok(())
    }

    async fn sum_amount(&self, kind: EntryKind, period: Option<&PeriodKey>) -> Result<Decimal> {
        let tables = self.inner.lock().await;
        let amounts = tables
            .matching(kind, period)
            .into_iter()
            .map(|tx| tx.amount());
        Ok(checked_total(amounts)?)
    }

    async fn list_periods(&self) -> Result<Vec<PeriodKey>> {
        let tables = self.inner.lock().await;
        let periods: BTreeSet<PeriodKey> = tables
            .income
            .iter()
            .chain(tables.spend.iter())
            .map(|tx| tx.period().clone())
            .collect();
        Ok(periods.into_iter().collect())
    }

    async fn list_transactions(
        &self,
        kind: EntryKind,
        period: Option<&PeriodKey>,
    ) -> Result<Vec<Transaction>> {
        let tables = self.inner.lock().await;
        let mut txs = tables.matching(kind, period);
        // Stable sort keeps insertion order within a period.
        txs.sort_by(|a, b| a.period().cmp(b.period()));
        Ok(txs)
    }

    async fn upsert_balance(&self, balance: MonthlyBalance) -> Result<()> {
        let mut tables = self.inner.lock().await;
        debug!(period = %balance.period, "Ledger UPSERT balance");
        tables.balances.insert(balance.period, balance.balance);
        Ok(())
    }

    async fn monthly_balances(&self) -> Result<Vec<MonthlyBalance>> {
        let tables = self.inner.lock().await;
        Ok(tables
            .balances
            .iter()
            .map(|(period, balance)| MonthlyBalance {
                period: period.clone(),
                balance: *balance,
            })
            .collect())
    }

    async fn spending_by_category(&self, period: &PeriodKey) -> Result<Vec<(String, Decimal)>> {
        let tables = self.inner.lock().await;
        let entries = tables
            .matching(EntryKind::Spend, Some(period))
            .into_iter()
            .filter_map(|tx| Some((tx.category()?.to_string(), tx.amount())));
        Ok(checked_totals_by(entries)?)
    }

    async fn income_by_period(&self) -> Result<Vec<(PeriodKey, Decimal)>> {
        let tables = self.inner.lock().await;
        let entries = tables
            .income
            .iter()
            .map(|tx| (tx.period().clone(), tx.amount()));
        Ok(checked_totals_by(entries)?)
    }
}
