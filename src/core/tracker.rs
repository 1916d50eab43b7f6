//! Records transactions and keeps the stored monthly balances in step with
//! them.
use crate::core::balance::{compute_monthly_balance, compute_running_balance};
use crate::core::error::LedgerError;
use crate::core::ledger::{EntryKind, LedgerStore, MonthlyBalance, PeriodKey, Transaction};
use anyhow::Result;
use rust_decimal::Decimal;
use tracing::{debug, info};

pub async fn record_income(
    store: &dyn LedgerStore,
    period: &PeriodKey,
    amount: Decimal,
) -> Result<MonthlyBalance> {
    ensure_positive(amount)?;
    ensure_total_fits(store, EntryKind::Income, period, amount).await?;
    store
        .record(Transaction::Income {
            period: period.clone(),
            amount,
        })
        .await?;
    info!(%period, %amount, "Recorded income");
    refresh_monthly_balance(store, period).await
}

pub async fn record_spend(
    store: &dyn LedgerStore,
    period: &PeriodKey,
    category: &str,
    amount: Decimal,
) -> Result<MonthlyBalance> {
    ensure_positive(amount)?;
    ensure_total_fits(store, EntryKind::Spend, period, amount).await?;
    store
        .record(Transaction::Spend {
            period: period.clone(),
            category: category.trim().to_string(),
            amount,
        })
        .await?;
    info!(%period, category, %amount, "Recorded spend");
    refresh_monthly_balance(store, period).await
}

/// Recomputes the balance of `period` from the stored records and replaces
/// the stored value. Calling it again without new records is a no-op.
pub async fn refresh_monthly_balance(
    store: &dyn LedgerStore,
    period: &PeriodKey,
) -> Result<MonthlyBalance> {
    let income = store.sum_amount(EntryKind::Income, Some(period)).await?;
    let spend = store.sum_amount(EntryKind::Spend, Some(period)).await?;
    let balance = compute_monthly_balance(period, income, spend);
    debug!(%period, %income, %spend, balance = %balance.balance, "Refreshed monthly balance");

    store.upsert_balance(balance.clone()).await?;
    Ok(balance)
}

/// Refreshes every period that has records. Returns the number of periods.
pub async fn rebuild_monthly_balances(store: &dyn LedgerStore) -> Result<usize> {
    let periods = store.list_periods().await?;
    for period in &periods {
        refresh_monthly_balance(store, period).await?;
    }
    info!(periods = periods.len(), "Rebuilt monthly balances");
    Ok(periods.len())
}

pub async fn running_balance(store: &dyn LedgerStore) -> Result<Decimal> {
    let income = store.sum_amount(EntryKind::Income, None).await?;
    let spend = store.sum_amount(EntryKind::Spend, None).await?;
    Ok(compute_running_balance(income, spend))
}

/// Loads a small demo ledger covering August to October 2024.
pub async fn seed_sample_data(store: &dyn LedgerStore) -> Result<usize> {
    let income = [
        ("2024-08", 1000),
        ("2024-09", 1000),
        ("2024-09", 1500),
        ("2024-10", 2000),
        ("2024-10", 2500),
    ];
    let spend = [
        ("2024-08", "rent", 2200),
        ("2024-09", "groceries", 200),
        ("2024-09", "entertainment", 150),
        ("2024-09", "utilities", 300),
        ("2024-10", "groceries", 250),
        ("2024-10", "rent", 1200),
    ];

    for (period, amount) in income {
        store
            .record(Transaction::Income {
                period: period.parse()?,
                amount: Decimal::from(amount),
            })
            .await?;
    }
    for (period, category, amount) in spend {
        store
            .record(Transaction::Spend {
                period: period.parse()?,
                category: category.to_string(),
                amount: Decimal::from(amount),
            })
            .await?;
    }

    rebuild_monthly_balances(store).await
}

fn ensure_positive(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount(amount));
    }
    Ok(())
}

/// Rejects an amount that would push the month or all-time total of `kind`
/// past `Decimal::MAX`, before anything is stored.
async fn ensure_total_fits(
    store: &dyn LedgerStore,
    kind: EntryKind,
    period: &PeriodKey,
    amount: Decimal,
) -> Result<()> {
    for scope in [Some(period), None] {
        let total = store.sum_amount(kind, scope).await?;
        if total.checked_add(amount).is_none() {
            return Err(LedgerError::TotalOverflow.into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryLedger;
    use rust_decimal_macros::dec;

    fn period(s: &str) -> PeriodKey {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_record_updates_monthly_balance() {
        let store = MemoryLedger::new();
        let sept = period("2024-09");

        let balance = record_income(&store, &sept, dec!(2500)).await.unwrap();
        assert_eq!(balance.balance, dec!(2500));

        record_spend(&store, &sept, "groceries", dec!(200)).await.unwrap();
        record_spend(&store, &sept, "entertainment", dec!(150)).await.unwrap();
        let balance = record_spend(&store, &sept, "utilities", dec!(300))
            .await
            .unwrap();
        assert_eq!(balance.balance, dec!(1850));

        let stored = store.monthly_balances().await.unwrap();
        assert_eq!(
            stored,
            vec![MonthlyBalance {
                period: sept,
                balance: dec!(1850),
            }]
        );
    }

    #[tokio::test]
    async fn test_late_transaction_replaces_balance() {
        let store = MemoryLedger::new();
        let oct = period("2024-10");

        record_income(&store, &oct, dec!(2000)).await.unwrap();
        record_spend(&store, &oct, "rent", dec!(1200)).await.unwrap();
        assert_eq!(store.monthly_balances().await.unwrap()[0].balance, dec!(800));

        // A late spend for the same month must produce the full new net,
        // not be added onto the previous stored value.
        record_spend(&store, &oct, "groceries", dec!(250)).await.unwrap();
        let stored = store.monthly_balances().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].balance, dec!(550));

        // Refreshing again is idempotent.
        refresh_monthly_balance(&store, &oct).await.unwrap();
        let stored = store.monthly_balances().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].balance, dec!(550));
    }

    #[tokio::test]
    async fn test_non_positive_amount_is_rejected() {
        let store = MemoryLedger::new();
        let aug = period("2024-08");

        let err = record_income(&store, &aug, dec!(0)).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<LedgerError>(),
            Some(&LedgerError::NonPositiveAmount(dec!(0)))
        );
        assert!(record_spend(&store, &aug, "rent", dec!(-5)).await.is_err());

        assert!(store.list_periods().await.unwrap().is_empty());
        assert!(store.monthly_balances().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_amount_overflowing_total_is_not_recorded() {
        let store = MemoryLedger::new();
        let sept = period("2024-09");
        let oct = period("2024-10");
        let half_max = dec!(50000000000000000000000000000);

        record_income(&store, &sept, half_max).await.unwrap();

        let err = record_income(&store, &sept, half_max).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<LedgerError>(),
            Some(&LedgerError::TotalOverflow)
        );
        // Another month still counts toward the all-time total.
        let err = record_income(&store, &oct, half_max).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<LedgerError>(),
            Some(&LedgerError::TotalOverflow)
        );

        assert_eq!(
            store.sum_amount(EntryKind::Income, None).await.unwrap(),
            half_max
        );
        assert_eq!(store.list_periods().await.unwrap(), vec![sept]);
        assert_eq!(running_balance(&store).await.unwrap(), half_max);

        record_spend(&store, &oct, "rent", half_max).await.unwrap();
        assert!(record_spend(&store, &oct, "rent", half_max).await.is_err());
        assert_eq!(running_balance(&store).await.unwrap(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_running_balance_of_empty_ledger() {
        let store = MemoryLedger::new();
        assert_eq!(running_balance(&store).await.unwrap(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_seed_sample_data() {
        let store = MemoryLedger::new();
        let periods = seed_sample_data(&store).await.unwrap();
        assert_eq!(periods, 3);

        let balances: Vec<(String, Decimal)> = store
            .monthly_balances()
            .await
            .unwrap()
            .into_iter()
            .map(|b| (b.period.to_string(), b.balance))
            .collect();
        assert_eq!(
            balances,
            vec![
                ("2024-08".to_string(), dec!(-1200)),
                ("2024-09".to_string(), dec!(1850)),
                ("2024-10".to_string(), dec!(3050)),
            ]
        );

        assert_eq!(running_balance(&store).await.unwrap(), dec!(3700));
    }

    #[tokio::test]
    async fn test_rebuild_overwrites_stale_balances() {
        let store = MemoryLedger::new();
        let aug = period("2024-08");
        store
            .record(Transaction::Income {
                period: aug.clone(),
                amount: dec!(1000),
            })
            .await
            .unwrap();
        store
            .upsert_balance(MonthlyBalance {
                period: aug.clone(),
                balance: dec!(99999),
            })
            .await
            .unwrap();

        assert_eq!(rebuild_monthly_balances(&store).await.unwrap(), 1);
        assert_eq!(store.monthly_balances().await.unwrap()[0].balance, dec!(1000));
    }
}
