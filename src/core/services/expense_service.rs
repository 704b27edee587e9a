use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    currency::{CurrencyCode, Converter},
    domain::{Category, Transaction},
    errors::{BudgetError, Result},
};

/// User input for a new expense before validation and conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub category_id: Uuid,
    pub amount: f64,
    pub currency: String,
    pub date: Option<DateTime<Utc>>,
    pub merchant: Option<String>,
    pub note: Option<String>,
}

impl ExpenseDraft {
    pub fn new(category_id: Uuid, amount: f64, currency: impl Into<String>) -> Self {
        Self {
            category_id,
            amount,
            currency: currency.into(),
            date: None,
            merchant: None,
            note: None,
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
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

pub struct ExpenseService;

impl ExpenseService {
    /// Parses a user-entered amount such as `"12.50"`; must be a positive number.
    pub fn parse_amount(raw: &str) -> Result<f64> {
        let amount: f64 = raw
            .trim()
            .parse()
            .map_err(|_| BudgetError::Validation(format!("`{}` is not a number", raw.trim())))?;
        ensure_positive(amount)?;
        Ok(amount)
    }

    /// Validates `draft` and turns it into a transaction dated `now` unless a date is given.
    ///
    /// When the converter has no rate for the draft's currency the original
    /// amount is recorded as the home amount.
    pub fn build(
        draft: ExpenseDraft,
        categories: &[Category],
        converter: &Converter<'_>,
        now: DateTime<Utc>,
    ) -> Result<Transaction> {
        ensure_positive(draft.amount)?;
        if !categories.iter().any(|c| c.id == draft.category_id) {
            return Err(BudgetError::CategoryNotFound(draft.category_id));
        }
        let currency = CurrencyCode::new(draft.currency);
        if currency.as_str().is_empty() {
            return Err(BudgetError::Validation("currency code is required".into()));
        }

        let date = draft.date.unwrap_or(now);
        let amount_home = match converter.convert(draft.amount, currency.as_str(), date.date_naive())
        {
            Some(value) => value,
            None => {
                tracing::warn!(
                    currency = %currency,
                    date = %date.date_naive(),
                    "no cached rate; recording original amount unconverted"
                );
                draft.amount
            }
        };

        let mut transaction = Transaction::new(draft.category_id, date, draft.amount, currency.0)
            .with_home_amount(amount_home);
        transaction.merchant = non_empty(draft.merchant);
        transaction.note = non_empty(draft.note);
        Ok(transaction)
    }
}

fn ensure_positive(amount: f64) -> Result<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(BudgetError::Validation(format!(
            "amount must be a positive number, got {}",
            amount
        )))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::{ConversionMode, FxCache, FxRate};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 14, 0, 0).unwrap()
    }

    #[test]
    fn builds_transaction_with_trimmed_optionals() {
        let food = Category::new("Food", 350.0);
        let home = CurrencyCode::default();
        let cache = FxCache::new();
        let converter = Converter::new(&home, ConversionMode::PassThrough, &cache);
        let draft = ExpenseDraft::new(food.id, 12.5, "cad")
            .with_merchant("  ")
            .with_note(" lunch ");
        let txn = ExpenseService::build(draft, &[food.clone()], &converter, now()).unwrap();
        assert_eq!(txn.date, now());
        assert_eq!(txn.currency_code, "CAD");
        assert_eq!(txn.amount_home, 12.5);
        assert_eq!(txn.merchant, None);
        assert_eq!(txn.note.as_deref(), Some("lunch"));
    }

    #[test]
    fn rejects_non_positive_amounts() {
        let food = Category::new("Food", 350.0);
        let home = CurrencyCode::default();
        let cache = FxCache::new();
        let converter = Converter::new(&home, ConversionMode::PassThrough, &cache);
        for amount in [0.0, -4.0, f64::NAN] {
            let draft = ExpenseDraft::new(food.id, amount, "CAD");
            let err = ExpenseService::build(draft, &[food.clone()], &converter, now()).unwrap_err();
            assert!(matches!(err, BudgetError::Validation(_)));
        }
    }

    #[test]
    fn missing_rate_falls_back_to_original_amount() {
        let fun = Category::new("Fun", 200.0);
        let home = CurrencyCode::default();
        let cache = FxCache::from_rates([FxRate::new("USD", 1.4, now().date_naive())]);
        let converter = Converter::new(&home, ConversionMode::CachedRates, &cache);

        let usd = ExpenseDraft::new(fun.id, 10.0, "USD");
        let txn = ExpenseService::build(usd, &[fun.clone()], &converter, now()).unwrap();
        assert!((txn.amount_home - 14.0).abs() < 1e-9);

        let thb = ExpenseDraft::new(fun.id, 300.0, "THB");
        let txn = ExpenseService::build(thb, &[fun.clone()], &converter, now()).unwrap();
        assert_eq!(txn.amount_home, 300.0);
        assert_eq!(txn.amount_original, 300.0);
    }

    #[test]
    fn parse_amount_accepts_decimal_text() {
        assert_eq!(ExpenseService::parse_amount(" 12.75 ").unwrap(), 12.75);
        assert!(ExpenseService::parse_amount("abc").is_err());
        assert!(ExpenseService::parse_amount("0").is_err());
    }
}
