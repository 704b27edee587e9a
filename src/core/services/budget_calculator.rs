//! Stateless budget and savings derivations.
//!
//! Every function here is a pure computation over already-loaded records: no
//! I/O, no clock access, no hidden state. Callers pass the period and cutoff
//! explicitly.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    BelongsToCategory, Category, HomeAmount, Identifiable, Transaction, TripGoal,
};
use crate::time::DateRange;

/// Allocated vs. spent for one category over one period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BudgetSnapshot {
    pub category_id: Uuid,
    pub allocated: f64,
    pub carried_over: f64,
    pub spent: f64,
    pub remaining: f64,
}

impl BudgetSnapshot {
    pub fn new(category_id: Uuid, allocated: f64, carried_over: f64, spent: f64) -> Self {
        Self {
            category_id,
            allocated,
            carried_over,
            spent,
            remaining: (allocated + carried_over - spent).max(0.0),
        }
    }

    /// Allocation available this period, including any carry-over.
    pub fn total(&self) -> f64 {
        self.allocated + self.carried_over
    }
}

/// Savings progress toward the trip goal at a cutoff instant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TripProgress {
    pub total_saved: f64,
    pub target: f64,
    pub delta: f64,
    pub on_track: bool,
}

impl TripProgress {
    /// Fraction of the target saved so far; `0.0` when the target is not positive.
    pub fn percent_saved(&self) -> f64 {
        if self.target > 0.0 {
            self.total_saved / self.target
        } else {
            0.0
        }
    }

    /// Amount still missing to reach the target.
    pub fn shortfall(&self) -> f64 {
        (-self.delta).max(0.0)
    }
}

/// Category ids whose transactions count as goal contributions.
///
/// Resolved once from the category list so per-call matching is a set lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavingsTargets {
    ids: HashSet<Uuid>,
}

impl SavingsTargets {
    pub fn resolve(categories: &[Category]) -> Self {
        Self {
            ids: categories
                .iter()
                .filter(|category| category.is_savings_target())
                .map(|category| category.id)
                .collect(),
        }
    }

    pub fn contains(&self, category_id: Uuid) -> bool {
        self.ids.contains(&category_id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<Uuid> for SavingsTargets {
    fn from_iter<I: IntoIterator<Item = Uuid>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Contract for budget derivations so presentation code can be tested against fakes.
pub trait BudgetCalculating {
    fn snapshot(
        &self,
        category: &Category,
        transactions: &[Transaction],
        period: &DateRange,
    ) -> BudgetSnapshot;

    fn trip_progress(
        &self,
        goal: &TripGoal,
        savings: &SavingsTargets,
        transactions: &[Transaction],
        up_to: DateTime<Utc>,
    ) -> TripProgress;

    fn daily_allowance(&self, remaining_this_month: f64, days_remaining: i64) -> f64;

    fn projected_month_end(
        &self,
        spend_last_7_days: f64,
        days_observed: i64,
        days_remaining: i64,
    ) -> f64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BudgetCalculator;

impl BudgetCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Unspent balance brought forward from the previous period.
    // TODO: sum the prior month's unspent allocation for categories with
    // `carry_over` set once prior-period snapshots are persisted.
    fn carried_over(&self, _category: &Category) -> f64 {
        0.0
    }

    /// Total allocation left across all categories for `period`, clamped at zero.
    pub fn remaining_in_period(
        &self,
        categories: &[Category],
        transactions: &[Transaction],
        period: &DateRange,
    ) -> f64 {
        let allocated: f64 = categories.iter().map(|c| c.monthly_limit).sum();
        let spent = spent_in(transactions, period);
        (allocated - spent).max(0.0)
    }
}

impl BudgetCalculating for BudgetCalculator {
    fn snapshot(
        &self,
        category: &Category,
        transactions: &[Transaction],
        period: &DateRange,
    ) -> BudgetSnapshot {
        let spent = transactions
            .iter()
            .filter(|txn| txn.category_id() == category.id() && period.contains(txn.date))
            .map(HomeAmount::home_amount)
            .sum();
        BudgetSnapshot::new(
            category.id,
            category.monthly_limit,
            self.carried_over(category),
            spent,
        )
    }

    fn trip_progress(
        &self,
        goal: &TripGoal,
        savings: &SavingsTargets,
        transactions: &[Transaction],
        up_to: DateTime<Utc>,
    ) -> TripProgress {
        let contributed: f64 = transactions
            .iter()
            .filter(|txn| savings.contains(txn.category_id()) && txn.date <= up_to)
            .map(HomeAmount::home_amount)
            .sum();
        let total_saved = goal.current_saved + contributed;
        let delta = total_saved - goal.target;
        TripProgress {
            total_saved,
            target: goal.target,
            delta,
            on_track: delta >= 0.0,
        }
    }

    fn daily_allowance(&self, remaining_this_month: f64, days_remaining: i64) -> f64 {
        if days_remaining <= 0 {
            return 0.0;
        }
        remaining_this_month / days_remaining as f64
    }

    fn projected_month_end(
        &self,
        spend_last_7_days: f64,
        days_observed: i64,
        days_remaining: i64,
    ) -> f64 {
        if days_observed <= 0 {
            return 0.0;
        }
        let average = spend_last_7_days / days_observed as f64;
        average * days_remaining as f64
    }
}

/// Sum of home-currency amounts dated inside `period`, across all categories.
pub fn spent_in(transactions: &[Transaction], period: &DateRange) -> f64 {
    transactions
        .iter()
        .filter(|txn| period.contains(txn.date))
        .map(HomeAmount::home_amount)
        .sum()
}
