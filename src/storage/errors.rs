use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinError;

use crate::types::{ExpenseId, LoanNumber};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store error: could not open [{}]: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },
    #[error("Store error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Store error: background ledger read did not complete: {0}")]
    Join(#[from] JoinError),
    #[error("Store error: loan [{0}] already exists")]
    DuplicateLoan(LoanNumber),
    #[error("Store error: expense [{0}] already exists")]
    DuplicateExpense(ExpenseId),
    /// A failure observed by a fetch that other cached readers were waiting on.
    #[error(transparent)]
    Shared(#[from] Arc<StoreError>)
}
