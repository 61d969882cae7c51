//! Persistence adapters for the expense collection.

pub mod sqlite;
pub mod traits;

pub use sqlite::SqliteExpenseStorage;
pub use traits::ExpenseStorage;
