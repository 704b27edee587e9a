use crate::{
    currency::{FxCache, FxRate},
    domain::{Category, Transaction, TripGoal},
    errors::Result,
};

use super::{BudgetStore, SeedData, SeedOutcome, StoreData};

/// Volatile store for previews and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: StoreData,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            data: StoreData::new(),
        }
    }

    pub fn with_data(data: StoreData) -> Self {
        let mut data = data;
        data.fx_rates.reindex();
        Self { data }
    }

    pub fn data(&self) -> &StoreData {
        &self.data
    }
}

impl BudgetStore for MemoryStore {
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
        self.data.insert_transaction(transaction)
    }

    fn upsert_rates(&mut self, rates: Vec<FxRate>) -> Result<()> {
        self.data.fx_rates.upsert(rates);
        Ok(())
    }

    fn seed_if_needed(&mut self, seed: SeedData) -> Result<SeedOutcome> {
        Ok(self.data.apply_seed(seed))
    }
}
