//! # Storage Traits
//!
//! Storage abstraction for the expense collection, so the domain layer can
//! run against different backends (the sqlite key-value table in
//! production, plain memory in tests) without modification.

use std::future::Future;

use anyhow::Result;
use shared::Expense;

/// Interface for persisting the expense collection.
///
/// Operations are whole-collection: every save rewrites the full
/// serialized blob and every load reads it back. There is no incremental
/// persistence; the dataset is a single user's, so O(collection) writes
/// per mutation are acceptable.
pub trait ExpenseStorage: Send + Sync + 'static {
    /// Persist the full collection, replacing any previously stored blob.
    fn save(&self, expenses: &[Expense]) -> impl Future<Output = Result<()>> + Send;

    /// Read the persisted collection.
    ///
    /// Absent data is an empty collection, not an error; I/O and decode
    /// failures are returned for the caller to degrade on.
    fn load(&self) -> impl Future<Output = Result<Vec<Expense>>> + Send;

    /// Remove the persisted collection entirely.
    fn clear(&self) -> impl Future<Output = Result<()>> + Send;
}
