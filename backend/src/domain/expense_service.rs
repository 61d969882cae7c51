//! The expense store: owns the canonical collection and mirrors it to
//! storage after every mutation.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use shared::{Expense, ExpenseDraft};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::errors::ExpenseError;
use crate::storage::ExpenseStorage;

/// Single source of truth for the expense collection.
///
/// Mutations update the in-memory collection first and then write the full
/// collection through to storage; reads only ever see the in-memory state,
/// so a persistence failure never loses the caller's view of the data.
pub struct ExpenseService<S: ExpenseStorage> {
    storage: Arc<S>,
    expenses: Arc<RwLock<Vec<Expense>>>,
    /// Serializes write-through saves so a slow save cannot overwrite a
    /// later mutation's state.
    persist_gate: Arc<Mutex<()>>,
}

impl<S: ExpenseStorage> Clone for ExpenseService<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            expenses: Arc::clone(&self.expenses),
            persist_gate: Arc::clone(&self.persist_gate),
        }
    }
}

impl<S: ExpenseStorage> ExpenseService<S> {
    /// Load the persisted collection and build the store around it.
    ///
    /// A failed load degrades to an empty collection: readers tolerate the
    /// empty state, and the first successful mutation re-persists.
    pub async fn initialize(storage: S) -> Self {
        let expenses = match storage.load().await {
            Ok(expenses) => {
                info!("Loaded {} persisted expenses", expenses.len());
                expenses
            }
            Err(err) => {
                warn!("Failed to load persisted expenses, starting empty: {err:#}");
                Vec::new()
            }
        };

        Self {
            storage: Arc::new(storage),
            expenses: Arc::new(RwLock::new(expenses)),
            persist_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Snapshot of the current collection.
    pub async fn get_all(&self) -> Vec<Expense> {
        self.expenses.read().await.clone()
    }

    /// Accept a validated candidate and append it to the collection.
    ///
    /// An externally supplied id is used as-is, which keeps ids
    /// deterministic for tests and imports; otherwise the id derives from
    /// the current epoch-millisecond clock, bumped until unique. The
    /// caller is trusted to have validated the candidate.
    pub async fn add(&self, draft: ExpenseDraft) -> Expense {
        let expense = {
            let mut expenses = self.expenses.write().await;
            let id = draft.id.unwrap_or_else(|| next_timestamp_id(&expenses));
            let expense = Expense {
                id,
                amount: draft.amount.unwrap_or_default(),
                date: draft.date,
                category: draft.category,
                note: draft.note,
            };
            expenses.push(expense.clone());
            expense
        };

        info!(
            "Added expense {} ({} {:.2})",
            expense.id, expense.category, expense.amount
        );
        self.persist().await;
        expense
    }

    /// Replace the record with the given id wholesale.
    ///
    /// The replacement carries the full field set from `draft`; nothing is
    /// merged. An unknown id reports [`ExpenseError::NotFound`] and leaves
    /// the collection untouched.
    pub async fn edit(&self, id: i64, draft: ExpenseDraft) -> Result<Expense, ExpenseError> {
        let replaced = {
            let mut expenses = self.expenses.write().await;
            let slot = expenses
                .iter_mut()
                .find(|expense| expense.id == id)
                .ok_or(ExpenseError::NotFound(id))?;
            *slot = Expense {
                id,
                amount: draft.amount.unwrap_or_default(),
                date: draft.date,
                category: draft.category,
                note: draft.note,
            };
            slot.clone()
        };

        info!("Replaced expense {}", id);
        self.persist().await;
        Ok(replaced)
    }

    /// Remove the record with the given id, returning it.
    ///
    /// An unknown id reports [`ExpenseError::NotFound`] and leaves the
    /// collection untouched.
    pub async fn delete(&self, id: i64) -> Result<Expense, ExpenseError> {
        let removed = {
            let mut expenses = self.expenses.write().await;
            let index = expenses
                .iter()
                .position(|expense| expense.id == id)
                .ok_or(ExpenseError::NotFound(id))?;
            expenses.remove(index)
        };

        info!("Deleted expense {}", id);
        self.persist().await;
        Ok(removed)
    }

    /// Clear persisted storage, then the in-memory collection.
    ///
    /// The persisted clear is awaited first; if it fails the in-memory
    /// collection is left intact and the failure surfaces to the caller.
    /// The gate is held across the whole reset so an in-flight save cannot
    /// write back a pre-reset snapshot.
    pub async fn reset(&self) -> Result<(), ExpenseError> {
        let _guard = self.persist_gate.lock().await;
        self.storage.clear().await?;
        self.expenses.write().await.clear();
        info!("Expense collection reset");
        Ok(())
    }

    /// Write-through save of the full collection.
    ///
    /// Saves are serialized by the gate and snapshot the collection only
    /// after acquiring it, so the last save to run always carries the
    /// newest state. Failures are logged and swallowed: the in-memory
    /// collection stays authoritative and the next mutation retries
    /// implicitly.
    async fn persist(&self) {
        let _guard = self.persist_gate.lock().await;
        let snapshot = self.expenses.read().await.clone();
        if let Err(err) = self.storage.save(&snapshot).await {
            warn!("Failed to persist {} expenses: {err:#}", snapshot.len());
        }
    }
}

/// Derive a fresh id from the current time, bumping past any collision
/// with an existing record.
fn next_timestamp_id(expenses: &[Expense]) -> i64 {
    let mut id = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as i64;
    while expenses.iter().any(|expense| expense.id == id) {
        id += 1;
    }
    id
}
