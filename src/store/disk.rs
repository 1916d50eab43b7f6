use crate::core::ledger::{
    EntryKind, LedgerStore, MonthlyBalance, PeriodKey, Transaction, checked_total,
    checked_totals_by,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// Ledger persisted in a fjall keyspace.
///
/// Income and spend records are keyed `YYYY-MM/<seq>` so a prefix scan on
/// the period yields exactly that month. Monthly balances are keyed by the
/// bare period. Values are JSON.
pub struct DiskLedger {
    keyspace: Keyspace,
    income: PartitionHandle,
    spend: PartitionHandle,
    balances: PartitionHandle,
}

impl DiskLedger {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;

        let keyspace = Config::new(path)
            .open()
            .with_context(|| format!("Failed to open ledger at {}", path.display()))?;
        let income = keyspace.open_partition("income", PartitionCreateOptions::default())?;
        let spend = keyspace.open_partition("spend", PartitionCreateOptions::default())?;
        let balances =
            keyspace.open_partition("monthly_balance", PartitionCreateOptions::default())?;
        debug!("Opened ledger at {}", path.display());

        Ok(Self {
            keyspace,
            income,
            spend,
            balances,
        })
    }

    fn partition(&self, kind: EntryKind) -> &PartitionHandle {
        match kind {
            EntryKind::Income => &self.income,
            EntryKind::Spend => &self.spend,
        }
    }

    fn scan(&self, kind: EntryKind, period: Option<&PeriodKey>) -> Result<Vec<Transaction>> {
        let partition = self.partition(kind);
        let prefix = period.map(|p| format!("{p}/")).unwrap_or_default();

        partition
            .prefix(prefix)
            .map(|item| {
                let (_, value) = item?;
                let tx: Transaction = serde_json::from_slice(&value)
                    .context("Failed to decode ledger record")?;
                Ok(tx)
            })
            .collect()
    }

    fn persist(&self) -> Result<()> {
        self.keyspace
            .persist(PersistMode::SyncAll)
            .context("Failed to flush ledger to disk")
    }
}

#[async_trait]
impl LedgerStore for DiskLedger {
    async fn record(&self, tx: Transaction) -> Result<()> {
        let partition = self.partition(tx.kind());
        let prefix = format!("{}/", tx.period());
        let seq = partition.prefix(&prefix).count();
        let key = format!("{prefix}{seq:08}");

        partition.insert(key.as_str(), serde_json::to_vec(&tx)?)?;
        self.persist()?;
        debug!("Ledger RECORD {} {}", tx.kind(), key);
        Ok(())
    }

    async fn sum_amount(&self, kind: EntryKind, period: Option<&PeriodKey>) -> Result<Decimal> {
        let amounts = self.scan(kind, period)?.into_iter().map(|tx| tx.amount());
        Ok(checked_total(amounts)?)
    }

    async fn list_periods(&self) -> Result<Vec<PeriodKey>> {
        let mut periods = BTreeSet::new();
        for partition in [&self.income, &self.spend] {
            for item in partition.keys() {
                let key = item?;
                let key = std::str::from_utf8(&key).context("Corrupt ledger key")?;
                let period = key.split('/').next().unwrap_or_default();
                periods.insert(period.parse::<PeriodKey>()?);
            }
        }
        Ok(periods.into_iter().collect())
    }

    async fn list_transactions(
        &self,
        kind: EntryKind,
        period: Option<&PeriodKey>,
    ) -> Result<Vec<Transaction>> {
        self.scan(kind, period)
    }

    async fn upsert_balance(&self, balance: MonthlyBalance) -> Result<()> {
        self.balances.insert(
            balance.period.as_str(),
            serde_json::to_vec(&balance.balance)?,
        )?;
        self.persist()?;
        debug!("Ledger UPSERT balance {}", balance.period);
        Ok(())
    }

    async fn monthly_balances(&self) -> Result<Vec<MonthlyBalance>> {
        self.balances
            .iter()
            .map(|item| {
                let (key, value) = item?;
                let period = std::str::from_utf8(&key)
                    .context("Corrupt balance key")?
                    .parse()?;
                let balance: Decimal = serde_json::from_slice(&value)
                    .context("Failed to decode monthly balance")?;
                Ok(MonthlyBalance { period, balance })
            })
            .collect()
    }

    async fn spending_by_category(&self, period: &PeriodKey) -> Result<Vec<(String, Decimal)>> {
        let entries = self
            .scan(EntryKind::Spend, Some(period))?
            .into_iter()
            .filter_map(|tx| Some((tx.category()?.to_string(), tx.amount())));
        Ok(checked_totals_by(entries)?)
    }

    async fn income_by_period(&self) -> Result<Vec<(PeriodKey, Decimal)>> {
        let entries = self
            .scan(EntryKind::Income, None)?
            .into_iter()
            .map(|tx| (tx.period().clone(), tx.amount()));
        Ok(checked_totals_by(entries)?)
    }
}
