//! Budget categories and their role in savings tracking.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Identifiable, NamedEntity};

/// A spending bucket with a monthly allocation in the home currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color_hex: String,
    pub monthly_limit: f64,
    /// Declared by the data model; snapshots do not read it yet.
    #[serde(default)]
    pub carry_over: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub role: CategoryRole,
}

impl Category {
    pub fn new(name: impl Into<String>, monthly_limit: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: String::new(),
            color_hex: String::new(),
            monthly_limit,
            carry_over: false,
            sort_order: 0,
            role: CategoryRole::Spending,
        }
    }

    pub fn with_role(mut self, role: CategoryRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn with_carry_over(mut self, carry_over: bool) -> Self {
        self.carry_over = carry_over;
        self
    }

    pub fn with_style(mut self, icon: impl Into<String>, color_hex: impl Into<String>) -> Self {
        self.icon = icon.into();
        self.color_hex = color_hex.into();
        self
    }

    pub fn is_savings_target(&self) -> bool {
        self.role == CategoryRole::SavingsTarget
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

/// How a category participates in goal tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CategoryRole {
    #[default]
    Spending,
    /// Contributions booked here count toward the trip goal.
    SavingsTarget,
}

impl fmt::Display for CategoryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryRole::Spending => "Spending",
            CategoryRole::SavingsTarget => "Savings",
        };
        f.write_str(label)
    }
}

/// Sorts categories by display order, breaking ties by name.
pub fn sort_for_display(categories: &mut [Category]) {
    categories.sort_by(|a, b| {
        a.sort_order
            .cmp(&b.sort_order)
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Finds a category by case-insensitive name.
pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    let needle = name.trim();
    categories
        .iter()
        .find(|category| category.name.eq_ignore_ascii_case(needle))
}
