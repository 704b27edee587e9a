use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single savings goal tracked alongside the monthly budgets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripGoal {
    pub target: f64,
    pub deadline: DateTime<Utc>,
    /// Savings accumulated outside tracked transactions.
    pub current_saved: f64,
    pub auto_save_weekly: f64,
}

impl TripGoal {
    /// Builds a goal and derives the weekly auto-save suggestion from the
    /// whole weeks left before `deadline`.
    pub fn planned(
        target: f64,
        current_saved: f64,
        deadline: DateTime<Utc>,
        weeks_remaining: i64,
    ) -> Self {
        Self {
            target,
            deadline,
            current_saved,
            auto_save_weekly: weekly_auto_save(target, current_saved, weeks_remaining),
        }
    }
}

/// Amount to set aside each week to reach `target` in `weeks_remaining` weeks.
/// With no whole week left the full outstanding balance is due at once.
pub fn weekly_auto_save(target: f64, current_saved: f64, weeks_remaining: i64) -> f64 {
    let outstanding = (target - current_saved).max(0.0);
    if weeks_remaining > 0 {
        outstanding / weeks_remaining as f64
    } else {
        outstanding
    }
}
