use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{BelongsToCategory, HomeAmount, Identifiable};

/// A logged expense. Transactions are append-only once stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub amount_original: f64,
    pub currency_code: String,
    /// Amount in the home currency as recorded at entry time.
    pub amount_home: f64,
    pub category_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    /// Creates a home-currency transaction where original and converted amounts match.
    pub fn new(
        category_id: Uuid,
        date: DateTime<Utc>,
        amount: f64,
        currency_code: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            amount_original: amount,
            currency_code: currency_code.into(),
            amount_home: amount,
            category_id,
            merchant: None,
            note: None,
        }
    }

    pub fn with_home_amount(mut self, amount_home: f64) -> Self {
        self.amount_home = amount_home;
        self
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = Some(merchant.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl HomeAmount for Transaction {
    fn home_amount(&self) -> f64 {
        self.amount_home
    }
}

impl BelongsToCategory for Transaction {
    fn category_id(&self) -> Uuid {
        self.category_id
    }
}
