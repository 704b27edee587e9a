//! Flat CSV export of logged transactions.
//!
//! The format is intentionally naive: commas inside merchant and note are
//! replaced with spaces and no field is quoted.

use std::path::{Path, PathBuf};

use chrono::SecondsFormat;
use uuid::Uuid;

use crate::{
    domain::{name_index, Category, Transaction},
    errors::Result,
    utils::paths::{ensure_dir, write_atomic},
};

pub const CSV_HEADER: &str =
    "Date,Category,Original Amount,Original Currency,Amount CAD,Merchant,Note";

pub struct ExportService;

impl ExportService {
    /// Renders the header plus one row per transaction, joined by `\n`.
    pub fn render_csv(transactions: &[Transaction], categories: &[Category]) -> String {
        let names = name_index(categories);

        let mut rows = Vec::with_capacity(transactions.len() + 1);
        rows.push(CSV_HEADER.to_string());
        for txn in transactions {
            let category = names
                .get(&txn.category_id)
                .map(|name| name.to_string())
                .unwrap_or_else(|| txn.category_id.to_string());
            rows.push(format!(
                "{},{},{},{},{},{},{}",
                txn.date.to_rfc3339_opts(SecondsFormat::Secs, true),
                category,
                txn.amount_original,
                txn.currency_code,
                txn.amount_home,
                strip_commas(txn.merchant.as_deref()),
                strip_commas(txn.note.as_deref()),
            ));
        }
        rows.join("\n")
    }

    /// Writes a `kbudget-export-<uuid>.csv` file into `dir` and returns its path.
    pub fn export_to_dir(
        dir: &Path,
        transactions: &[Transaction],
        categories: &[Category],
    ) -> Result<PathBuf> {
        ensure_dir(dir)?;
        let path = dir.join(format!("kbudget-export-{}.csv", Uuid::new_v4()));
        write_atomic(&path, &Self::render_csv(transactions, categories))?;
        tracing::info!(path = %path.display(), rows = transactions.len(), "csv export written");
        Ok(path)
    }
}

fn strip_commas(value: Option<&str>) -> String {
    value.map(|text| text.replace(',', " ")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn header_only_for_empty_input() {
        assert_eq!(ExportService::render_csv(&[], &[]), CSV_HEADER);
    }

    #[test]
    fn unknown_category_falls_back_to_id() {
        let orphan = Uuid::new_v4();
        let txn = Transaction::new(orphan, Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(), 1.0, "CAD");
        let csv = ExportService::render_csv(&[txn], &[]);
        assert!(csv.ends_with(&format!("2025-01-02T03:04:05Z,{orphan},1,CAD,1,,")));
    }
}
