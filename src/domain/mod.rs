//! Plain data records shared by the store, calculator and presentation layers.

pub mod category;
pub mod common;
pub mod goal;
pub mod transaction;

pub use category::{Category, CategoryRole};
pub use common::{name_index, BelongsToCategory, HomeAmount, Identifiable, NamedEntity};
pub use goal::TripGoal;
pub use transaction::Transaction;
