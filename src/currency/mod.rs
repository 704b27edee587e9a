use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String")]
pub struct CurrencyCode(pub String);

impl From<String> for CurrencyCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new(HOME_CURRENCY)
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Default home currency all budget figures are normalised to.
pub const HOME_CURRENCY: &str = "CAD";

/// Currencies offered when logging an expense.
pub const SUPPORTED_CURRENCIES: [&str; 4] = ["CAD", "USD", "THB", "IDR"];

/// Cached conversion rate from `code` into the home currency on `date`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FxRate {
    pub code: CurrencyCode,
    pub rate_to_home: f64,
    pub date: NaiveDate,
}

impl FxRate {
    pub fn new(code: impl Into<String>, rate_to_home: f64, date: NaiveDate) -> Self {
        Self {
            code: CurrencyCode::new(code),
            rate_to_home,
            date,
        }
    }
}

/// Local rate cache keyed by `(code, date)`. Inserting an existing key replaces it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FxCache {
    #[serde(default)]
    rates: Vec<FxRate>,
    #[serde(skip)]
    index: HashMap<(String, NaiveDate), usize>,
}

impl FxCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rates(rates: impl IntoIterator<Item = FxRate>) -> Self {
        let mut cache = Self::new();
        cache.upsert(rates);
        cache
    }

    pub fn upsert(&mut self, rates: impl IntoIterator<Item = FxRate>) {
        for rate in rates {
            let key = (rate.code.0.clone(), rate.date);
            match self.index.get(&key) {
                Some(&slot) => self.rates[slot] = rate,
                None => {
                    self.index.insert(key, self.rates.len());
                    self.rates.push(rate);
                }
            }
        }
    }

    pub fn rate_for(&self, code: &str, date: NaiveDate) -> Option<&FxRate> {
        let key = (CurrencyCode::new(code).0, date);
        self.index.get(&key).map(|&slot| &self.rates[slot])
    }

    pub fn rates(&self) -> &[FxRate] {
        &self.rates
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Rebuilds the lookup index after deserialisation.
    pub(crate) fn reindex(&mut self) {
        let rates = std::mem::take(&mut self.rates);
        self.index.clear();
        self.upsert(rates);
    }
}

/// How foreign amounts are turned into home-currency amounts at entry time.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConversionMode {
    /// Records the original amount unchanged for every currency.
    #[default]
    PassThrough,
    /// Applies a cached same-day rate; yields no value when the rate is missing.
    CachedRates,
}

/// Converts amounts into the home currency according to a [`ConversionMode`].
#[derive(Debug, Clone, Copy)]
pub struct Converter<'a> {
    home: &'a CurrencyCode,
    mode: ConversionMode,
    cache: &'a FxCache,
}

impl<'a> Converter<'a> {
    pub fn new(home: &'a CurrencyCode, mode: ConversionMode, cache: &'a FxCache) -> Self {
        Self { home, mode, cache }
    }

    pub fn convert(&self, amount: f64, code: &str, date: NaiveDate) -> Option<f64> {
        if code.trim().eq_ignore_ascii_case(self.home.as_str()) {
            return Some(amount);
        }
        match self.mode {
            ConversionMode::PassThrough => Some(amount),
            ConversionMode::CachedRates => self
                .cache
                .rate_for(code, date)
                .map(|rate| amount * rate.rate_to_home),
        }
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" | "CAD" => "$".into(),
        "THB" => "฿".into(),
        "IDR" => "Rp".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        _ => code.into(),
    }
}

/// Formats a home-currency amount with two decimals, e.g. `$1,234.50`.
pub fn format_amount(amount: f64, code: &CurrencyCode) -> String {
    let body = group_digits(&format!("{:.2}", amount.abs()));
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}{}", sign, symbol_for(code.as_str()), body)
}

fn group_digits(formatted: &str) -> String {
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted, ""));
    let mut grouped = String::new();
    for (count, ch) in int_part.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, ch);
    }
    if frac_part.is_empty() {
        grouped
    } else {
        format!("{}.{}", grouped, frac_part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn cache_replaces_same_code_and_date() {
        let mut cache = FxCache::new();
        cache.upsert([FxRate::new("usd", 1.30, day(1))]);
        cache.upsert([FxRate::new("USD", 1.35, day(1)), FxRate::new("USD", 1.40, day(2))]);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.rate_for("USD", day(1)).unwrap().rate_to_home, 1.35);
        assert!(cache.rate_for("USD", day(3)).is_none());
    }

    #[test]
    fn pass_through_returns_original_amount() {
        let home = CurrencyCode::default();
        let cache = FxCache::new();
        let converter = Converter::new(&home, ConversionMode::PassThrough, &cache);
        assert_eq!(converter.convert(250.0, "THB", day(1)), Some(250.0));
    }

    #[test]
    fn cached_rates_require_a_rate() {
        let home = CurrencyCode::default();
        let cache = FxCache::from_rates([FxRate::new("USD", 1.25, day(1))]);
        let converter = Converter::new(&home, ConversionMode::CachedRates, &cache);
        assert_eq!(converter.convert(100.0, "usd", day(1)), Some(125.0));
        assert_eq!(converter.convert(100.0, "USD", day(2)), None);
        assert_eq!(converter.convert(100.0, "cad", day(2)), Some(100.0));
    }

    #[test]
    fn cache_survives_json_round_trip() {
        let cache = FxCache::from_rates([FxRate::new("IDR", 0.000085, day(4))]);
        let json = serde_json::to_string(&cache).unwrap();
        let mut restored: FxCache = serde_json::from_str(&json).unwrap();
        restored.reindex();
        assert!(restored.rate_for("IDR", day(4)).is_some());
    }

    #[test]
    fn amounts_format_with_grouping() {
        let cad = CurrencyCode::default();
        assert_eq!(format_amount(1234.5, &cad), "$1,234.50");
        assert_eq!(format_amount(-7500.0, &cad), "-$7,500.00");
        assert_eq!(format_amount(0.0, &cad), "$0.00");
    }
}
