use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use crate::models::{Expense, Loan};
use crate::storage::{LedgerStore, StoreError};
use crate::types::LoanNumber;

/// How long a fetched snapshot is served before the ledger is read again.
pub const DEFAULT_SNAPSHOT_TTL: Duration = Duration::from_secs(300);

/// Serves recent ledger snapshots from memory.
///
/// Concurrent misses for the same snapshot share one fetch from the wrapped
/// store. Failed fetches are not cached.
pub struct CachedLedger<S> {
    inner: Arc<S>,
    loans: Cache<(), Arc<Vec<Loan>>>,
    expenses: Cache<(), Arc<Vec<Expense>>>
}

impl<S: LedgerStore> CachedLedger<S> {
    pub fn new(inner: Arc<S>) -> Self {
        Self::with_ttl(inner, DEFAULT_SNAPSHOT_TTL)
    }

    pub fn with_ttl(inner: Arc<S>, ttl: Duration) -> Self {
        Self {
            inner,
            loans: Cache::builder().time_to_live(ttl).build(),
            expenses: Cache::builder().time_to_live(ttl).build()
        }
    }

    /// Drops both snapshots so the next fetch reads the wrapped store.
    pub fn invalidate(&self) {
        self.loans.invalidate_all();
        self.expenses.invalidate_all();
    }

    async fn loan_snapshot(&self) -> Result<Arc<Vec<Loan>>, StoreError> {
        let snapshot = self.loans.try_get_with((), async {
            debug!("Loan snapshot expired or missing, fetching from the ledger");
            self.inner.fetch_loans().await.map(Arc::new)
        }).await?;

        Ok(snapshot)
    }
}

impl<S: LedgerStore> LedgerStore for CachedLedger<S> {
    async fn fetch_loans(&self) -> Result<Vec<Loan>, StoreError> {
        Ok(self.loan_snapshot().await?.as_ref().clone())
    }

    async fn fetch_expenses(&self) -> Result<Vec<Expense>, StoreError> {
        let snapshot = self.expenses.try_get_with((), async {
            debug!("Expense snapshot expired or missing, fetching from the ledger");
            self.inner.fetch_expenses().await.map(Arc::new)
        }).await?;

        Ok(snapshot.as_ref().clone())
    }

    async fn fetch_loan(&self, loan_number: LoanNumber) -> Result<Option<Loan>, StoreError> {
        let snapshot = self.loan_snapshot().await?;
        Ok(snapshot.iter().find(|loan| loan.loan_number == loan_number).cloned())
    }
}
