//! Record stores feeding the calculator.

pub mod json_backend;
pub mod memory;
pub mod seed;

use serde::{Deserialize, Serialize};

use crate::{
    currency::{FxCache, FxRate},
    domain::{category::sort_for_display, Category, Transaction, TripGoal},
    errors::{BudgetError, Result},
};

pub use json_backend::JsonStore;
pub use memory::MemoryStore;
pub use seed::{SeedData, SeedOutcome};

/// Version written into every persisted store document.
pub const STORE_SCHEMA_VERSION: u32 = 1;

/// Abstraction over the on-device record store.
///
/// Implementations hand out owned, internally consistent snapshots: every
/// transaction returned references a category from the same store.
pub trait BudgetStore: Send {
    /// Categories ordered for display.
    fn list_categories(&self) -> Vec<Category>;

    /// Transactions, newest first.
    fn list_transactions(&self) -> Vec<Transaction>;

    /// The first trip goal found, if any.
    fn trip_goal(&self) -> Option<TripGoal>;

    fn fx_cache(&self) -> &FxCache;

    /// Appends a transaction. Fails when its category is unknown.
    fn add_transaction(&mut self, transaction: Transaction) -> Result<()>;

    fn upsert_rates(&mut self, rates: Vec<FxRate>) -> Result<()>;

    /// Inserts default categories and goal when the store has none.
    fn seed_if_needed(&mut self, seed: SeedData) -> Result<SeedOutcome>;

    /// Persists pending state. Stores without durable backing do nothing.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Serialisable contents shared by every backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub trip_goals: Vec<TripGoal>,
    #[serde(default)]
    pub fx_rates: FxCache,
}

fn default_schema_version() -> u32 {
    STORE_SCHEMA_VERSION
}

impl StoreData {
    pub fn new() -> Self {
        Self {
            schema_version: STORE_SCHEMA_VERSION,
            ..Self::default()
        }
    }

    pub(crate) fn sorted_categories(&self) -> Vec<Category> {
        let mut categories = self.categories.clone();
        sort_for_display(&mut categories);
        categories
    }

    pub(crate) fn newest_first(&self) -> Vec<Transaction> {
        let mut transactions = self.transactions.clone();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        transactions
    }

    pub(crate) fn insert_transaction(&mut self, transaction: Transaction) -> Result<()> {
        if !self
            .categories
            .iter()
            .any(|category| category.id == transaction.category_id)
        {
            return Err(BudgetError::CategoryNotFound(transaction.category_id));
        }
        self.transactions.push(transaction);
        Ok(())
    }

    pub(crate) fn apply_seed(&mut self, seed: SeedData) -> SeedOutcome {
        let mut outcome = SeedOutcome::default();
        if self.categories.is_empty() {
            self.categories = seed.categories;
            outcome.categories = true;
        }
        if self.trip_goals.is_empty() {
            self.trip_goals.push(seed.goal);
            outcome.goal = true;
        }
        outcome
    }

    /// Returns messages for records that break store invariants.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for txn in &self.transactions {
            if !self.categories.iter().any(|c| c.id == txn.category_id) {
                warnings.push(format!(
                    "transaction {} references missing category {}",
                    txn.id, txn.category_id
                ));
            }
            if txn.amount_original <= 0.0 {
                warnings.push(format!(
                    "transaction {} has non-positive amount {}",
                    txn.id, txn.amount_original
                ));
            }
        }
        for category in &self.categories {
            if category.monthly_limit < 0.0 {
                warnings.push(format!(
                    "category {} has negative limit {}",
                    category.name, category.monthly_limit
                ));
            }
        }
        if self.trip_goals.len() > 1 {
            warnings.push(format!(
                "{} trip goals stored; only the first is used",
                self.trip_goals.len()
            ));
        }
        warnings
    }
}
