pub mod disk;
pub mod memory;

use crate::core::config::AppConfig;
use crate::core::ledger::LedgerStore;
use anyhow::Result;
use disk::DiskLedger;

/// Opens the persistent ledger under the configured data directory.
pub fn open_ledger(config: &AppConfig) -> Result<Box<dyn LedgerStore>> {
    let path = config.default_data_path()?.join("ledger");
    Ok(Box::new(DiskLedger::open(&path)?))
}
