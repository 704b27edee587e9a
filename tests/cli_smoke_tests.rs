mod common;

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

use common::test_dir;

fn cli(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("kbudget_cli").expect("binary built");
    cmd.env("KBUDGET_HOME", home)
        .env("KBUDGET_PLAIN_OUTPUT", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_commands() {
    cli(&test_dir())
        .write_stdin("help\nexit\n")
        .assert()
        .success()
        .stdout(contains("Available commands"))
        .stdout(contains("summary"))
        .stdout(contains("export"));
}

#[test]
fn version_reports_schema() {
    cli(&test_dir())
        .write_stdin("version\n")
        .assert()
        .success()
        .stdout(contains(format!("kbudget {}", env!("CARGO_PKG_VERSION"))))
        .stdout(contains("Store schema : v1"));
}

#[test]
fn summary_shows_seeded_categories() {
    cli(&test_dir())
        .write_stdin("summary\ncategories\n")
        .assert()
        .success()
        .stdout(contains("Left this month"))
        .stdout(contains("Trip Fund"))
        .stdout(contains("Food"));
}

#[test]
fn added_expense_appears_in_history_after_restart() {
    let home = test_dir();
    cli(&home)
        .write_stdin("add food 12.50 --merchant \"Corner Cafe\"\nexit\n")
        .assert()
        .success()
        .stdout(contains("[ok] Added $12.50 to Food."));

    cli(&home)
        .write_stdin("history cafe\n")
        .assert()
        .success()
        .stdout(contains("Corner Cafe"))
        .stdout(contains("Today"));
}

#[test]
fn invalid_input_is_reported_without_exiting() {
    cli(&test_dir())
        .write_stdin("add Rent 5\nadd Food -3\nsumary\n")
        .assert()
        .success()
        .stderr(contains("Unknown category `Rent`"))
        .stderr(contains("amount must be a positive number"))
        .stdout(contains("Did you mean `summary`?"));
}

#[test]
fn export_writes_csv_into_requested_dir() {
    let home = test_dir();
    let out = home.join("out");
    let script = format!("add Fun 20\nexport {}\n", out.display());
    cli(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(contains("Exported to"));

    let entries: Vec<_> = fs::read_dir(&out)
        .expect("export dir exists")
        .filter_map(Result::ok)
        .collect();
    assert_eq!(entries.len(), 1);
    let csv = fs::read_to_string(entries[0].path()).expect("read export");
    assert!(csv.lines().nth(1).is_some_and(|row| row.contains(",Fun,20,CAD,20,,")));
}

#[test]
fn rate_command_caches_rate() {
    let home = test_dir();
    cli(&home)
        .write_stdin("rate usd 1.35 2025-03-01\nrates\n")
        .assert()
        .success()
        .stdout(contains("Cached 1 USD = 1.35 CAD on 2025-03-01."))
        .stdout(contains("2025-03-01").and(contains("USD")));
    assert!(home.join("budget.json").exists());
}
