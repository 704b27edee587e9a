use chrono::{DateTime, Utc};

use crate::{
    config::Config,
    domain::{Category, CategoryRole, TripGoal},
};

/// Records inserted on first launch.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub categories: Vec<Category>,
    pub goal: TripGoal,
}

/// Which parts of a seed were applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    pub categories: bool,
    pub goal: bool,
}

impl SeedOutcome {
    pub fn any(&self) -> bool {
        self.categories || self.goal
    }
}

struct DefaultCategory {
    name: &'static str,
    icon: &'static str,
    color_hex: &'static str,
    limit: f64,
    carry_over: bool,
    role: CategoryRole,
}

const DEFAULT_CATEGORIES: [DefaultCategory; 7] = [
    DefaultCategory {
        name: "Food",
        icon: "fork.knife",
        color_hex: "#f97316",
        limit: 350.0,
        carry_over: false,
        role: CategoryRole::Spending,
    },
    DefaultCategory {
        name: "Transport",
        icon: "car.fill",
        color_hex: "#38bdf8",
        limit: 150.0,
        carry_over: true,
        role: CategoryRole::Spending,
    },
    DefaultCategory {
        name: "Housing",
        icon: "house.fill",
        color_hex: "#a855f7",
        limit: 400.0,
        carry_over: false,
        role: CategoryRole::Spending,
    },
    DefaultCategory {
        name: "Fun",
        icon: "party.popper.fill",
        color_hex: "#f43f5e",
        limit: 200.0,
        carry_over: false,
        role: CategoryRole::Spending,
    },
    DefaultCategory {
        name: "Misc",
        icon: "tray.fill",
        color_hex: "#94a3b8",
        limit: 150.0,
        carry_over: false,
        role: CategoryRole::Spending,
    },
    DefaultCategory {
        name: "Trip Fund",
        icon: "airplane.departure",
        color_hex: "#22c55e",
        limit: 500.0,
        carry_over: true,
        role: CategoryRole::SavingsTarget,
    },
    DefaultCategory {
        name: "Sinking Fund",
        icon: "wallet.pass.fill",
        color_hex: "#facc15",
        limit: 250.0,
        carry_over: true,
        role: CategoryRole::Spending,
    },
];

impl SeedData {
    /// Default categories plus a goal with the given parameters.
    pub fn defaults(
        target: f64,
        current_saved: f64,
        deadline: DateTime<Utc>,
        weeks_remaining: i64,
    ) -> Self {
        let categories = DEFAULT_CATEGORIES
            .iter()
            .zip(0..)
            .map(|(item, sort_order)| {
                Category::new(item.name, item.limit)
                    .with_style(item.icon, item.color_hex)
                    .with_carry_over(item.carry_over)
                    .with_sort_order(sort_order)
                    .with_role(item.role)
            })
            .collect();
        Self {
            categories,
            goal: TripGoal::planned(target, current_saved, deadline, weeks_remaining),
        }
    }

    /// Seed derived from the configured goal defaults as of `now`.
    pub fn from_config(config: &Config, now: DateTime<Utc>) -> Self {
        let goal = &config.trip_goal;
        let deadline = goal.deadline_at();
        let weeks = config.calendar().whole_weeks_between(now, deadline);
        Self::defaults(goal.target, goal.current_saved, deadline, weeks)
    }
}
