use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    domain::{Category, Transaction, TripGoal},
    time::Calendar,
};

use super::budget_calculator::{
    spent_in, BudgetCalculating, BudgetCalculator, SavingsTargets, TripProgress,
};

/// Days of history used to project month-end spending.
pub const PROJECTION_WINDOW_DAYS: u32 = 7;

/// One category line on the dashboard.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub remaining: f64,
    pub total: f64,
    pub spent: f64,
}

impl CategoryRow {
    /// Share of the allocation used, clamped to `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.total <= 0.0 {
            return 0.0;
        }
        ((self.total - self.remaining) / self.total).clamp(0.0, 1.0)
    }
}

/// Presentation-ready figures for the current month.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSummary {
    pub as_of: DateTime<Utc>,
    pub trip: Option<TripProgress>,
    pub month_remaining: f64,
    pub today_remaining: f64,
    pub week_remaining: f64,
    pub projected_month_end: f64,
    pub categories: Vec<CategoryRow>,
}

/// Inputs for one dashboard derivation, borrowed from a store snapshot.
pub struct DashboardInputs<'a> {
    pub categories: &'a [Category],
    pub transactions: &'a [Transaction],
    pub goal: Option<&'a TripGoal>,
    pub calendar: &'a Calendar,
    pub now: DateTime<Utc>,
}

pub struct DashboardService;

impl DashboardService {
    pub fn summarize(calculator: &BudgetCalculator, inputs: DashboardInputs<'_>) -> DashboardSummary {
        let DashboardInputs {
            categories,
            transactions,
            goal,
            calendar,
            now,
        } = inputs;

        let month = calendar.month_of(now);
        let week = calendar.week_of(now);
        let month_remaining = calculator.remaining_in_period(categories, transactions, &month);

        let today_remaining =
            calculator.daily_allowance(month_remaining, calendar.days_remaining(now, &month));
        let week_remaining =
            calculator.daily_allowance(month_remaining, calendar.days_remaining(now, &week));

        let recent = calendar.trailing_days(now, PROJECTION_WINDOW_DAYS);
        let projected_month_end = calculator.projected_month_end(
            spent_in(transactions, &recent),
            i64::from(PROJECTION_WINDOW_DAYS),
            calendar.days_remaining(now, &month),
        );

        let savings = SavingsTargets::resolve(categories);
        let trip = goal.map(|goal| calculator.trip_progress(goal, &savings, transactions, now));

        let rows = categories
            .iter()
            .map(|category| {
                let snapshot = calculator.snapshot(category, transactions, &month);
                CategoryRow {
                    id: category.id,
                    name: category.name.clone(),
                    remaining: snapshot.remaining,
                    total: snapshot.total(),
                    spent: snapshot.spent,
                }
            })
            .collect();

        DashboardSummary {
            as_of: now,
            trip,
            month_remaining,
            today_remaining,
            week_remaining,
            projected_month_end,
            categories: rows,
        }
    }
}
