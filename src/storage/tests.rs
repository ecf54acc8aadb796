use super::{CachedLedger, CsvLedger, LedgerStore, MemoryLedger, StoreError};

use std::fs;
use std::io::Write;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use tempfile::{tempdir, NamedTempFile};
use tokio::time::sleep;

use crate::models::{Expense, Loan, LoanAmountField, LoanFilter};
use crate::types::LoanStatus;

const LOAN_HEADER: &str = "loan_number,customer_type,customer_name,loan_amount,pending_loan_amount,released";

fn create_loan(loan_number: u32, customer_type: Option<&str>, loan_amount: &str, pending: &str, status: LoanStatus) -> Result<Loan> {
    let mut loan = Loan::new(loan_number);
    loan.customer_type = customer_type.map(str::to_string);
    loan.loan_amount = Some(Decimal::from_str(loan_amount)?);
    loan.pending_loan_amount = Some(Decimal::from_str(pending)?);
    loan.status = status;
    Ok(loan)
}

fn create_temporary_csv(header: &str, rows: &[&str]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;

    writeln!(file, "{header}")?;

    for row in rows {
        writeln!(file, "{row}")?;
    }

    Ok(file)
}

struct CountingLedger {
    inner: MemoryLedger,
    loan_fetches: AtomicUsize
}

impl LedgerStore for CountingLedger {
    async fn fetch_loans(&self) -> Result<Vec<Loan>, StoreError> {
        self.loan_fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_loans().await
    }

    async fn fetch_expenses(&self) -> Result<Vec<Expense>, StoreError> {
        self.inner.fetch_expenses().await
    }
}

#[tokio::test]
async fn test_memory_ledger_returns_loans_ordered_by_number() -> Result<()> {
    let ledger = MemoryLedger::new();
    ledger.insert_loan(Loan::new(30))?;
    ledger.insert_loan(Loan::new(10))?;
    ledger.insert_loan(Loan::new(20))?;

    let numbers: Vec<u32> = ledger.fetch_loans().await?.iter().map(|loan| loan.loan_number).collect();

    assert_eq!(numbers, vec![10, 20, 30]);
    assert!(ledger.fetch_loan(20).await?.is_some());
    assert!(ledger.fetch_loan(99).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_memory_ledger_rejects_duplicate_keys() -> Result<()> {
    let ledger = MemoryLedger::new();
    ledger.insert_loan(Loan::new(1))?;

    assert!(matches!(ledger.insert_loan(Loan::new(1)), Err(StoreError::DuplicateLoan(1))));

    ledger.insert_expense(Expense::new(4))?;

    assert!(matches!(ledger.insert_expense(Expense::new(4)), Err(StoreError::DuplicateExpense(4))));
    assert_eq!(ledger.fetch_expenses().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_filtered_queries_and_aggregates_agree() -> Result<()> {
    let ledger = MemoryLedger::with_loans(vec![
        create_loan(1, Some("Vyapari"), "1000", "400", LoanStatus::Active)?,
        create_loan(2, Some("Vyapari"), "500", "0", LoanStatus::Released)?,
        create_loan(3, None, "250", "250", LoanStatus::Active)?,
    ])?;

    let active = LoanFilter::Status(LoanStatus::Active);
    let vyapari = LoanFilter::CustomerType("Vyapari".to_string());
    let unknown = LoanFilter::CustomerType("Unknown".to_string());

    assert_eq!(ledger.count_loans(&active).await?, 2);
    assert_eq!(ledger.count_loans(&vyapari).await?, 2);
    assert_eq!(ledger.count_loans(&unknown).await?, 1);

    assert_eq!(ledger.sum_loans(LoanAmountField::PendingLoanAmount, &active).await?, Decimal::from(650));
    assert_eq!(ledger.sum_loans(LoanAmountField::LoanAmount, &vyapari).await?, Decimal::from(1500));
    assert_eq!(ledger.sum_loans(LoanAmountField::InterestAmount, &vyapari).await?, Decimal::ZERO);

    let released = ledger.fetch_loans_where(&LoanFilter::Status(LoanStatus::Released)).await?;
    assert_eq!(released.len(), 1);
    assert_eq!(released[0].loan_number, 2);

    Ok(())
}

#[tokio::test]
async fn test_csv_ledger_reads_rows_and_skips_malformed_input() -> Result<()> {
    let file = create_temporary_csv(LOAN_HEADER, &[
        "2,Vyapari,Ramesh,50000,0,TRUE",
        "1,Private,Sita,100000,40000,",
        "oops,Private,Bad,abc,0,",
        "3,,,25000.50,25000.50,FALSE",
    ])?;

    let ledger = CsvLedger::new(file.path());
    let loans = ledger.fetch_loans().await?;

    let numbers: Vec<u32> = loans.iter().map(|loan| loan.loan_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(loans[1].status, LoanStatus::Released);
    assert_eq!(loans[2].loan_amount, Some(Decimal::from_str("25000.50")?));

    Ok(())
}

#[tokio::test]
async fn test_csv_ledger_keeps_first_row_for_duplicate_loan_number() -> Result<()> {
    let file = create_temporary_csv(LOAN_HEADER, &[
        "7,Vyapari,First,100,0,",
        "7,Vyapari,Second,200,0,",
    ])?;

    let loans = CsvLedger::new(file.path()).fetch_loans().await?;

    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0].customer_name.as_deref(), Some("First"));

    Ok(())
}

#[tokio::test]
async fn test_csv_ledger_reports_missing_file() -> Result<()> {
    let directory = tempdir()?;
    let ledger = CsvLedger::new(directory.path().join("missing.csv"));

    assert!(matches!(ledger.fetch_loans().await, Err(StoreError::Io { .. })));

    Ok(())
}

#[tokio::test]
async fn test_csv_ledger_without_expenses_returns_empty_ledger() -> Result<()> {
    let loans = create_temporary_csv(LOAN_HEADER, &["1,Private,Sita,100,0,"])?;
    let expenses = create_temporary_csv("id,date,item,amount,ledger", &["2,2024-01-05,Rent,15000,Office", "1,2024-01-02,Tea,120,Pantry"])?;

    assert!(CsvLedger::new(loans.path()).fetch_expenses().await?.is_empty());

    let ledger = CsvLedger::new(loans.path()).with_expenses(expenses.path());
    let ids: Vec<u32> = ledger.fetch_expenses().await?.iter().map(|expense| expense.id).collect();

    assert_eq!(ids, vec![1, 2]);

    Ok(())
}

#[tokio::test]
async fn test_cached_ledger_serves_snapshot_until_invalidated() -> Result<()> {
    let counting = Arc::new(CountingLedger {
        inner: MemoryLedger::with_loans(vec![Loan::new(1)])?,
        loan_fetches: AtomicUsize::new(0)
    });
    let cached = CachedLedger::new(counting.clone());

    assert_eq!(cached.fetch_loans().await?.len(), 1);
    assert_eq!(cached.fetch_loans().await?.len(), 1);
    assert!(cached.fetch_loan(1).await?.is_some());
    assert_eq!(counting.loan_fetches.load(Ordering::SeqCst), 1);

    counting.inner.insert_loan(Loan::new(2))?;

    assert_eq!(cached.fetch_loans().await?.len(), 1);

    cached.invalidate();

    assert_eq!(cached.fetch_loans().await?.len(), 2);
    assert_eq!(counting.loan_fetches.load(Ordering::SeqCst), 2);

    Ok(())
}

#[tokio::test]
async fn test_cached_ledger_refetches_after_ttl() -> Result<()> {
    let counting = Arc::new(CountingLedger {
        inner: MemoryLedger::with_loans(vec![Loan::new(1)])?,
        loan_fetches: AtomicUsize::new(0)
    });
    let cached = CachedLedger::with_ttl(counting.clone(), Duration::from_millis(50));

    cached.fetch_loans().await?;
    sleep(Duration::from_millis(200)).await;
    cached.fetch_loans().await?;

    assert_eq!(counting.loan_fetches.load(Ordering::SeqCst), 2);

    Ok(())
}

#[tokio::test]
async fn test_cached_ledger_does_not_cache_failures() -> Result<()> {
    let directory = tempdir()?;
    let path = directory.path().join("loans.csv");
    let cached = CachedLedger::new(Arc::new(CsvLedger::new(&path)));

    let error = cached.fetch_loans().await.err().ok_or_else(|| anyhow!("expected a fetch error"))?;
    assert!(matches!(error, StoreError::Shared(_)));

    fs::write(&path, format!("{LOAN_HEADER}\n1,Private,Sita,100,0,\n"))?;

    assert_eq!(cached.fetch_loans().await?.len(), 1);

    Ok(())
}
