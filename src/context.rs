//! Application context tying configuration, store, clock and calculator together.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    config::{Config, ConfigManager},
    core::services::{
        BudgetCalculator, DashboardInputs, DashboardService, DashboardSummary, ExpenseDraft,
        ExpenseService, ExportService, HistoryService, HistorySection,
    },
    currency::{Converter, CurrencyCode, FxRate},
    domain::{category::find_by_name, Category, Transaction, TripGoal},
    errors::{BudgetError, Result},
    storage::{BudgetStore, JsonStore, SeedData},
    time::{Calendar, Clock, SystemClock},
    utils::paths,
};

/// Owns every collaborator a front end needs. Replaces process-wide state.
pub struct AppContext {
    config: Config,
    base_dir: PathBuf,
    store: Box<dyn BudgetStore>,
    clock: Arc<dyn Clock>,
    calculator: BudgetCalculator,
    calendar: Calendar,
}

impl AppContext {
    /// Opens the JSON store and config under `base_dir`, seeding defaults on first run.
    pub fn init(base_dir: PathBuf) -> Result<Self> {
        let config = ConfigManager::with_base_dir(base_dir.clone())?.load()?;
        let store = JsonStore::open_in(&base_dir)?;
        Self::with_parts(config, base_dir, Box::new(store), Arc::new(SystemClock))
    }

    pub fn with_parts(
        config: Config,
        base_dir: PathBuf,
        mut store: Box<dyn BudgetStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let outcome = store.seed_if_needed(SeedData::from_config(&config, clock.now()))?;
        if outcome.any() {
            tracing::debug!(?outcome, "first run defaults applied");
        }
        let calendar = config.calendar();
        Ok(Self {
            config,
            base_dir,
            store,
            clock,
            calculator: BudgetCalculator::new(),
            calendar,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn calculator(&self) -> &BudgetCalculator {
        &self.calculator
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.store.list_categories()
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.store.list_transactions()
    }

    pub fn trip_goal(&self) -> Option<TripGoal> {
        self.store.trip_goal()
    }

    pub fn fx_rates(&self) -> Vec<FxRate> {
        self.store.fx_cache().rates().to_vec()
    }

    pub fn dashboard(&self) -> DashboardSummary {
        let categories = self.store.list_categories();
        let transactions = self.store.list_transactions();
        let goal = self.store.trip_goal();
        DashboardService::summarize(
            &self.calculator,
            DashboardInputs {
                categories: &categories,
                transactions: &transactions,
                goal: goal.as_ref(),
                calendar: &self.calendar,
                now: self.clock.now(),
            },
        )
    }

    pub fn history(&self, query: &str) -> Vec<HistorySection> {
        HistoryService::sections(
            &self.store.list_transactions(),
            &self.store.list_categories(),
            query,
        )
    }

    /// Case-insensitive category lookup by display name.
    pub fn find_category(&self, name: &str) -> Result<Category> {
        let categories = self.store.list_categories();
        find_by_name(&categories, name)
            .cloned()
            .ok_or_else(|| BudgetError::UnknownCategoryName(name.trim().to_string()))
    }

    pub fn add_expense(&mut self, draft: ExpenseDraft) -> Result<Transaction> {
        let categories = self.store.list_categories();
        let transaction = {
            let converter = Converter::new(
                &self.config.home_currency,
                self.config.conversion_mode,
                self.store.fx_cache(),
            );
            ExpenseService::build(draft, &categories, &converter, self.clock.now())?
        };
        self.store.add_transaction(transaction.clone())?;
        tracing::info!(
            id = %transaction.id,
            amount = transaction.amount_home,
            "expense recorded"
        );
        Ok(transaction)
    }

    /// Caches a rate to the home currency for `code` on `date` (today when omitted).
    pub fn upsert_rate(
        &mut self,
        code: &str,
        rate_to_home: f64,
        date: Option<NaiveDate>,
    ) -> Result<FxRate> {
        let code = CurrencyCode::new(code);
        if code.as_str().is_empty() {
            return Err(BudgetError::Validation("currency code is required".into()));
        }
        if !(rate_to_home.is_finite() && rate_to_home > 0.0) {
            return Err(BudgetError::Validation(format!(
                "rate must be a positive number, got {}",
                rate_to_home
            )));
        }
        let rate = FxRate::new(code.0, rate_to_home, date.unwrap_or_else(|| self.clock.today()));
        self.store.upsert_rates(vec![rate.clone()])?;
        Ok(rate)
    }

    /// Writes a CSV export into `dir`, the configured export dir, or `<base>/exports`.
    pub fn export_csv(&self, dir: Option<&Path>) -> Result<PathBuf> {
        let target = match (dir, self.config.export_dir.as_deref()) {
            (Some(dir), _) => dir.to_path_buf(),
            (None, Some(configured)) => configured.to_path_buf(),
            (None, None) => paths::export_dir_in(&self.base_dir),
        };
        ExportService::export_to_dir(
            &target,
            &self.store.list_transactions(),
            &self.store.list_categories(),
        )
    }

    /// Flushes the store and drops the context.
    pub fn shutdown(mut self) -> Result<()> {
        self.store.flush()
    }
}
