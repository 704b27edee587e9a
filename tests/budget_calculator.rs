use chrono::{DateTime, Duration, TimeZone, Utc};
use kbudget_core::{
    core::services::{BudgetCalculating, BudgetCalculator, SavingsTargets},
    domain::{Category, CategoryRole, Transaction, TripGoal},
    time::{Calendar, DateRange},
};

fn march() -> DateRange {
    Calendar::iso().month_of(at(15))
}

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap()
}

fn spend(category: &Category, day: u32, amount: f64) -> Transaction {
    Transaction::new(category.id, at(day), amount, "CAD")
}

fn trip_fund() -> Category {
    Category::new("Trip Fund", 0.0).with_role(CategoryRole::SavingsTarget)
}

#[test]
fn untouched_category_keeps_full_allocation() {
    let calculator = BudgetCalculator::new();
    let food = Category::new("Food", 350.0);
    let other = Category::new("Fun", 200.0);
    let transactions = vec![spend(&other, 4, 80.0)];

    let snapshot = calculator.snapshot(&food, &transactions, &march());
    assert_eq!(snapshot.spent, 0.0);
    assert_eq!(snapshot.remaining, snapshot.allocated + snapshot.carried_over);
    assert_eq!(snapshot.carried_over, 0.0);
}

#[test]
fn spending_within_the_limit_reduces_remaining() {
    let calculator = BudgetCalculator::new();
    let food = Category::new("Food", 350.0);
    let transactions = vec![
        spend(&food, 2, 100.0),
        spend(&food, 9, 50.0),
        spend(&food, 20, 80.0),
    ];

    let snapshot = calculator.snapshot(&food, &transactions, &march());
    assert_eq!(snapshot.spent, 230.0);
    assert_eq!(snapshot.remaining, 120.0);
}

#[test]
fn overspending_clamps_remaining_at_zero() {
    let calculator = BudgetCalculator::new();
    let food = Category::new("Food", 350.0);
    let transactions = vec![spend(&food, 3, 250.0), spend(&food, 28, 150.0)];

    let snapshot = calculator.snapshot(&food, &transactions, &march());
    assert_eq!(snapshot.spent, 400.0);
    assert_eq!(snapshot.remaining, 0.0);
}

#[test]
fn transactions_outside_the_period_are_ignored() {
    let calculator = BudgetCalculator::new();
    let food = Category::new("Food", 350.0);
    let february = Utc.with_ymd_and_hms(2025, 2, 28, 23, 59, 59).unwrap();
    let april = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
    let transactions = vec![
        Transaction::new(food.id, february, 40.0, "CAD"),
        Transaction::new(food.id, april, 60.0, "CAD"),
        Transaction::new(food.id, march().start, 5.0, "CAD"),
        Transaction::new(food.id, march().end, 7.0, "CAD"),
    ];

    let snapshot = calculator.snapshot(&food, &transactions, &march());
    assert_eq!(snapshot.spent, 12.0);
}

#[test]
fn snapshot_is_idempotent() {
    let calculator = BudgetCalculator::new();
    let food = Category::new("Food", 350.0);
    let transactions = vec![spend(&food, 2, 100.0), spend(&food, 9, 50.0)];

    let first = calculator.snapshot(&food, &transactions, &march());
    let second = calculator.snapshot(&food, &transactions, &march());
    assert_eq!(first, second);
}

#[test]
fn daily_allowance_splits_and_guards_days() {
    let calculator = BudgetCalculator::new();
    assert_eq!(calculator.daily_allowance(100.0, 10), 10.0);
    for remaining in [0.0, 42.0, -5.0] {
        assert_eq!(calculator.daily_allowance(remaining, 0), 0.0);
        assert_eq!(calculator.daily_allowance(remaining, -3), 0.0);
    }
}

#[test]
fn trip_progress_counts_savings_before_cutoff() {
    let calculator = BudgetCalculator::new();
    let fund = trip_fund();
    let food = Category::new("Food", 350.0);
    let categories = vec![food.clone(), fund.clone()];
    let goal = TripGoal::planned(10_000.0, 2_000.0, at(31) + Duration::days(300), 40);
    let transactions = vec![
        spend(&fund, 10, 500.0),
        spend(&food, 10, 90.0),
        spend(&fund, 25, 300.0),
    ];

    let progress = calculator.trip_progress(
        &goal,
        &SavingsTargets::resolve(&categories),
        &transactions,
        at(20),
    );
    assert_eq!(progress.total_saved, 2_500.0);
    assert_eq!(progress.delta, -7_500.0);
    assert!(!progress.on_track);
    assert_eq!(progress.shortfall(), 7_500.0);
}

#[test]
fn zero_target_is_always_on_track() {
    let calculator = BudgetCalculator::new();
    let fund = trip_fund();
    let goal = TripGoal::planned(0.0, 0.0, at(31), 0);
    let savings = SavingsTargets::resolve(std::slice::from_ref(&fund));

    let empty = calculator.trip_progress(&goal, &savings, &[], at(31));
    assert!(empty.on_track);

    let saved = calculator.trip_progress(&goal, &savings, &[spend(&fund, 5, 12.0)], at(31));
    assert!(saved.on_track);
    assert!(saved.delta >= 0.0);
}

#[test]
fn renamed_savings_category_still_counts() {
    let calculator = BudgetCalculator::new();
    let mut fund = trip_fund();
    fund.name = "Bali 2026".into();
    let plain = Category::new("Trip Fund", 0.0);
    let categories = vec![fund.clone(), plain.clone()];
    let goal = TripGoal::planned(1_000.0, 0.0, at(31), 0);
    let transactions = vec![spend(&fund, 3, 100.0), spend(&plain, 3, 900.0)];

    let progress = calculator.trip_progress(
        &goal,
        &SavingsTargets::resolve(&categories),
        &transactions,
        at(31),
    );
    assert_eq!(progress.total_saved, 100.0);
}

#[test]
fn projection_scales_recent_average() {
    let calculator = BudgetCalculator::new();
    assert_eq!(calculator.projected_month_end(70.0, 7, 10), 100.0);
    assert_eq!(calculator.projected_month_end(70.0, 0, 10), 0.0);
    assert_eq!(calculator.projected_month_end(70.0, 7, 0), 0.0);
}

#[test]
fn remaining_in_period_sums_all_categories() {
    let calculator = BudgetCalculator::new();
    let food = Category::new("Food", 350.0);
    let fun = Category::new("Fun", 200.0);
    let transactions = vec![spend(&food, 2, 100.0), spend(&fun, 3, 50.0)];
    let categories = vec![food, fun];

    assert_eq!(
        calculator.remaining_in_period(&categories, &transactions, &march()),
        400.0
    );
}
