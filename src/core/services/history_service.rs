use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{name_index, Category, Transaction};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistoryEntry {
    pub id: Uuid,
    /// Merchant when present, otherwise the category name.
    pub title: String,
    pub category: String,
    pub amount_home: f64,
    pub amount_original: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistorySection {
    pub date: NaiveDate,
    pub entries: Vec<HistoryEntry>,
}

impl HistorySection {
    pub fn title(&self, today: NaiveDate) -> String {
        if self.date == today {
            "Today".to_string()
        } else if self.date == today - Duration::days(1) {
            "Yesterday".to_string()
        } else {
            self.date.format("%d %b %Y").to_string()
        }
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|entry| entry.amount_home).sum()
    }
}

pub struct HistoryService;

impl HistoryService {
    /// Transactions matching `query` grouped by day, newest day first.
    ///
    /// Matching is case-insensitive over merchant, note and category name; a
    /// blank query keeps everything. Entries keep their input order within a day.
    pub fn sections(
        transactions: &[Transaction],
        categories: &[Category],
        query: &str,
    ) -> Vec<HistorySection> {
        let names = name_index(categories);
        let needle = query.trim().to_lowercase();

        let mut grouped: HashMap<NaiveDate, Vec<HistoryEntry>> = HashMap::new();
        for txn in transactions {
            let category = names.get(&txn.category_id).copied().unwrap_or("Unknown");
            if !needle.is_empty() && !matches(txn, category, &needle) {
                continue;
            }
            grouped
                .entry(txn.date.date_naive())
                .or_default()
                .push(HistoryEntry {
                    id: txn.id,
                    title: txn
                        .merchant
                        .clone()
                        .unwrap_or_else(|| category.to_string()),
                    category: category.to_string(),
                    amount_home: txn.amount_home,
                    amount_original: txn.amount_original,
                    currency: txn.currency_code.clone(),
                });
        }

        let mut sections: Vec<HistorySection> = grouped
            .into_iter()
            .map(|(date, entries)| HistorySection { date, entries })
            .collect();
        sections.sort_by(|a, b| b.date.cmp(&a.date));
        sections
    }
}

fn matches(txn: &Transaction, category: &str, needle: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(needle);
    txn.merchant.as_deref().is_some_and(contains)
        || txn.note.as_deref().is_some_and(contains)
        || contains(category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn fixtures() -> (Vec<Category>, Vec<Transaction>) {
        let food = Category::new("Food", 350.0);
        let fun = Category::new("Fun", 200.0);
        let transactions = vec![
            Transaction::new(food.id, Utc.with_ymd_and_hms(2025, 3, 12, 19, 0, 0).unwrap(), 30.0, "CAD")
                .with_merchant("Night Market"),
            Transaction::new(fun.id, Utc.with_ymd_and_hms(2025, 3, 12, 8, 0, 0).unwrap(), 12.0, "USD")
                .with_note("Cinema, late show"),
            Transaction::new(food.id, Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap(), 9.0, "CAD"),
        ];
        (vec![food, fun], transactions)
    }

    #[test]
    fn groups_by_day_newest_first() {
        let (categories, transactions) = fixtures();
        let sections = HistoryService::sections(&transactions, &categories, "");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].date, NaiveDate::from_ymd_opt(2025, 3, 12).unwrap());
        assert_eq!(sections[0].entries.len(), 2);
        assert_eq!(sections[0].entries[0].title, "Night Market");
        assert_eq!(sections[1].entries[0].title, "Food");
        assert_eq!(sections[0].total(), 42.0);
    }

    #[test]
    fn search_matches_note_merchant_and_category() {
        let (categories, transactions) = fixtures();
        let by_note = HistoryService::sections(&transactions, &categories, "CINEMA");
        assert_eq!(by_note.len(), 1);
        assert_eq!(by_note[0].entries[0].category, "Fun");

        let by_category = HistoryService::sections(&transactions, &categories, "food");
        let count: usize = by_category.iter().map(|s| s.entries.len()).sum();
        assert_eq!(count, 2);

        assert!(HistoryService::sections(&transactions, &categories, "rent").is_empty());
    }

    #[test]
    fn section_titles_are_relative_to_today() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        let section = |date| HistorySection {
            date,
            entries: Vec::new(),
        };
        assert_eq!(section(today).title(today), "Today");
        assert_eq!(section(today - Duration::days(1)).title(today), "Yesterday");
        assert_eq!(section(today - Duration::days(2)).title(today), "10 Mar 2025");
    }
}
