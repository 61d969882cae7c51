use thiserror::Error;

/// Failure modes surfaced by the expense store.
///
/// Validation failures are not errors; they travel as a field→message map
/// from `domain::validation`. Write-through save failures are logged and
/// recovered, so they never appear here either.
#[derive(Debug, Error)]
pub enum ExpenseError {
    /// No expense with the requested id; the collection is left unchanged.
    #[error("expense {0} not found")]
    NotFound(i64),

    /// The persisted store could not be cleared.
    #[error("expense storage failure: {0}")]
    Persistence(#[from] anyhow::Error),
}
