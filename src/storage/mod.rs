mod cached_ledger;
mod csv_ledger;
mod errors;
mod memory_ledger;
#[cfg(test)]
mod tests;

use std::fmt::Display;
use std::future::Future;
use std::hash::Hash;

use rust_decimal::Decimal;

use crate::engine::sum_field;
use crate::models::{Expense, Loan, LoanAmountField, LoanFilter};
use crate::types::{ExpenseId, LoanNumber};

pub use cached_ledger::CachedLedger;
pub use csv_ledger::CsvLedger;
pub use errors::StoreError;
pub use memory_ledger::MemoryLedger;

/// Read access to the loan and expense ledgers.
///
/// Every fetch hands back an owned snapshot; callers aggregate over it without
/// holding anything in the store. The filtered and aggregate queries have
/// default implementations on top of `fetch_loans` so that every store
/// computes them with the same formulas as the engine.
pub trait LedgerStore: Send + Sync + 'static {
    /// All loans, ordered by loan number.
    fn fetch_loans(&self) -> impl Future<Output = Result<Vec<Loan>, StoreError>> + Send;

    /// All expense lines, ordered by id.
    fn fetch_expenses(&self) -> impl Future<Output = Result<Vec<Expense>, StoreError>> + Send;

    fn fetch_loan(&self, loan_number: LoanNumber) -> impl Future<Output = Result<Option<Loan>, StoreError>> + Send {
        async move {
            let loans = self.fetch_loans().await?;
            Ok(loans.into_iter().find(|loan| loan.loan_number == loan_number))
        }
    }

    fn fetch_loans_where(&self, filter: &LoanFilter) -> impl Future<Output = Result<Vec<Loan>, StoreError>> + Send {
        async move {
            let loans = self.fetch_loans().await?;
            Ok(loans.into_iter().filter(|loan| filter.matches(loan)).collect())
        }
    }

    fn count_loans(&self, filter: &LoanFilter) -> impl Future<Output = Result<usize, StoreError>> + Send {
        async move {
            Ok(self.fetch_loans_where(filter).await?.len())
        }
    }

    fn sum_loans(&self, field: LoanAmountField, filter: &LoanFilter) -> impl Future<Output = Result<Decimal, StoreError>> + Send {
        async move {
            let loans = self.fetch_loans_where(filter).await?;
            Ok(sum_field(&loans, field))
        }
    }
}

/// A keyed ledger row.
pub(crate) trait LedgerRow: Clone + Send + 'static {
    type Key: Copy + Ord + Hash + Display + Send + Sync;
    const KIND: &'static str;

    fn key(&self) -> Self::Key;
}

impl LedgerRow for Loan {
    type Key = LoanNumber;
    const KIND: &'static str = "loan";

    fn key(&self) -> LoanNumber {
        self.loan_number
    }
}

impl LedgerRow for Expense {
    type Key = ExpenseId;
    const KIND: &'static str = "expense";

    fn key(&self) -> ExpenseId {
        self.id
    }
}
