use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::models::{Expense, Loan};
use crate::storage::{LedgerRow, LedgerStore, StoreError};
use crate::types::{ExpenseId, LoanNumber};

/// In-memory ledger, used as a fixture store and for embedding.
pub struct MemoryLedger {
    loans: DashMap<LoanNumber, Loan>,
    expenses: DashMap<ExpenseId, Expense>
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            loans: DashMap::new(),
            expenses: DashMap::new()
        }
    }

    /// Builds a ledger from loans, rejecting duplicate loan numbers.
    pub fn with_loans<I>(loans: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = Loan>,
    {
        let ledger = Self::new();

        for loan in loans {
            ledger.insert_loan(loan)?;
        }

        Ok(ledger)
    }

    /// Loan numbers are immutable once assigned, so an existing key is an error.
    pub fn insert_loan(&self, loan: Loan) -> Result<(), StoreError> {
        match self.loans.entry(loan.loan_number) {
            Entry::Occupied(_) => Err(StoreError::DuplicateLoan(loan.loan_number)),
            Entry::Vacant(entry) => {
                entry.insert(loan);
                Ok(())
            }
        }
    }

    pub fn insert_expense(&self, expense: Expense) -> Result<(), StoreError> {
        match self.expenses.entry(expense.id) {
            Entry::Occupied(_) => Err(StoreError::DuplicateExpense(expense.id)),
            Entry::Vacant(entry) => {
                entry.insert(expense);
                Ok(())
            }
        }
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted_snapshot<T: LedgerRow>(rows: &DashMap<T::Key, T>) -> Vec<T> {
    let mut snapshot: Vec<T> = rows.iter().map(|entry| entry.value().clone()).collect();
    snapshot.sort_by_key(|row| row.key());
    snapshot
}

impl LedgerStore for MemoryLedger {
    async fn fetch_loans(&self) -> Result<Vec<Loan>, StoreError> {
        Ok(sorted_snapshot(&self.loans))
    }

    async fn fetch_expenses(&self) -> Result<Vec<Expense>, StoreError> {
        Ok(sorted_snapshot(&self.expenses))
    }

    async fn fetch_loan(&self, loan_number: LoanNumber) -> Result<Option<Loan>, StoreError> {
        Ok(self.loans.get(&loan_number).map(|entry| entry.value().clone()))
    }
}
