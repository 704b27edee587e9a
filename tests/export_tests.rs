mod common;

use std::fs;

use insta::assert_snapshot;
use kbudget_core::{
    core::services::{export_service::CSV_HEADER, ExportService},
    domain::{Category, Transaction},
};

use common::{at, test_dir};

fn fixtures() -> (Vec<Category>, Vec<Transaction>) {
    let food = Category::new("Food", 350.0);
    let fun = Category::new("Fun", 200.0);
    let transactions = vec![
        Transaction::new(food.id, at(2025, 3, 12, 19), 12.5, "CAD")
            .with_merchant("Noodles, Inc")
            .with_note("dinner"),
        Transaction::new(fun.id, at(2025, 3, 11, 8), 20.0, "USD")
            .with_home_amount(25.0)
            .with_note("cinema, late"),
    ];
    (vec![food, fun], transactions)
}

#[test]
fn csv_rows_follow_export_format() {
    let (categories, transactions) = fixtures();
    let csv = ExportService::render_csv(&transactions, &categories);
    assert_snapshot!(csv, @r###"
    Date,Category,Original Amount,Original Currency,Amount CAD,Merchant,Note
    2025-03-12T19:00:00Z,Food,12.5,CAD,12.5,Noodles  Inc,dinner
    2025-03-11T08:00:00Z,Fun,20,USD,25,,cinema  late
    "###);
}

#[test]
fn export_writes_uniquely_named_file() {
    let (categories, transactions) = fixtures();
    let dir = test_dir().join("exports");

    let first = ExportService::export_to_dir(&dir, &transactions, &categories).expect("export");
    let second = ExportService::export_to_dir(&dir, &transactions, &categories).expect("export");
    assert_ne!(first, second);

    let name = first.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    assert!(name.starts_with("kbudget-export-") && name.ends_with(".csv"));

    let contents = fs::read_to_string(&first).expect("read export");
    assert!(contents.starts_with(CSV_HEADER));
    assert!(!contents.ends_with('\n'));
    assert_eq!(contents.lines().count(), 3);
}
