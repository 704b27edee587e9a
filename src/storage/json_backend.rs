use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    currency::{FxCache, FxRate},
    domain::{Category, Transaction, TripGoal},
    errors::{BudgetError, Result},
    utils::paths::{self, write_atomic},
};

use super::{BudgetStore, SeedData, SeedOutcome, StoreData, STORE_SCHEMA_VERSION};

/// Single-document JSON store. Every mutation is written through atomically.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
    data: StoreData,
}

impl JsonStore {
    /// Opens the store file under `base`, starting empty when it does not exist yet.
    pub fn open_in(base: &Path) -> Result<Self> {
        Self::open(paths::store_file_in(base))
    }

    pub fn open(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            load_store_from_path(&path)?
        } else {
            tracing::info!(path = %path.display(), "creating new budget store");
            StoreData::new()
        };
        for warning in data.warnings() {
            tracing::warn!(path = %path.display(), "{warning}");
        }
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &StoreData {
        &self.data
    }

    fn persist(&self) -> Result<()> {
        self.write(&self.data)
    }

    /// Saves `next` and adopts it only once it is on disk.
    fn commit(&mut self, next: StoreData) -> Result<()> {
        self.write(&next)?;
        self.data = next;
        Ok(())
    }

    fn write(&self, data: &StoreData) -> Result<()> {
        save_store_to_path(data, &self.path).map_err(|err| {
            tracing::error!(path = %self.path.display(), error = %err, "failed to save budget store");
            err
        })
    }
}

impl BudgetStore for JsonStore {
    fn list_categories(&self) -> Vec<Category> {
        self.data.sorted_categories()
    }

    fn list_transactions(&self) -> Vec<Transaction> {
        self.data.newest_first()
    }

    fn trip_goal(&self) -> Option<TripGoal> {
        self.data.trip_goals.first().cloned()
    }

    fn fx_cache(&self) -> &FxCache {
        &self.data.fx_rates
    }

    fn add_transaction(&mut self, transaction: Transaction) -> Result<()> {
        let id = transaction.id;
        let mut next = self.data.clone();
        next.insert_transaction(transaction)?;
        self.commit(next)?;
        tracing::debug!(%id, "transaction stored");
        Ok(())
    }

    fn upsert_rates(&mut self, rates: Vec<FxRate>) -> Result<()> {
        let count = rates.len();
        let mut next = self.data.clone();
        next.fx_rates.upsert(rates);
        self.commit(next)?;
        tracing::debug!(count, "fx rates stored");
        Ok(())
    }

    fn seed_if_needed(&mut self, seed: SeedData) -> Result<SeedOutcome> {
        let mut next = self.data.clone();
        let outcome = next.apply_seed(seed);
        if outcome.any() {
            self.commit(next)?;
            tracing::info!(
                categories = outcome.categories,
                goal = outcome.goal,
                "seeded budget store"
            );
        }
        Ok(outcome)
    }

    fn flush(&mut self) -> Result<()> {
        self.persist()
    }
}

pub fn save_store_to_path(data: &StoreData, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    write_atomic(path, &json)
}

pub fn load_store_from_path(path: &Path) -> Result<StoreData> {
    let raw = fs::read_to_string(path)?;
    let mut data: StoreData = serde_json::from_str(&raw)?;
    if data.schema_version > STORE_SCHEMA_VERSION {
        return Err(BudgetError::Storage(format!(
            "`{}` uses schema v{} but this build supports up to v{}",
            path.display(),
            data.schema_version,
            STORE_SCHEMA_VERSION
        )));
    }
    data.fx_rates.reindex();
    Ok(data)
}
