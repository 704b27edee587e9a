pub mod budget_calculator;
pub mod dashboard_service;
pub mod expense_service;
pub mod export_service;
pub mod history_service;

pub use budget_calculator::{
    BudgetCalculating, BudgetCalculator, BudgetSnapshot, SavingsTargets, TripProgress,
};
pub use dashboard_service::{CategoryRow, DashboardInputs, DashboardService, DashboardSummary};
pub use expense_service::{ExpenseDraft, ExpenseService};
pub use export_service::ExportService;
pub use history_service::{HistoryEntry, HistorySection, HistoryService};
