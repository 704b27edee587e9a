#![doc(test(attr(deny(warnings))))]

//! kbudget core: monthly category budgets, trip savings progress and the
//! daily allowance derived from them, plus the store, export and CLI
//! layers that feed the calculator.

pub mod cli;
pub mod config;
pub mod context;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod time;
pub mod utils;

pub use context::AppContext;
pub use crate::core::services::{BudgetCalculating, BudgetCalculator};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("kbudget tracing initialized");
    });
}
