use thiserror::Error;
use uuid::Uuid;

/// Error type shared by the store, configuration, export and expense layers.
///
/// The calculator itself never fails; everything that touches disk or user
/// input reports through this enum.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),
    #[error("Unknown category `{0}`")]
    UnknownCategoryName(String),
    #[error("Invalid input: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, BudgetError>;
