use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use tokio::task::spawn_blocking;
use tracing::{debug, error, warn};

use crate::models::{Expense, Loan};
use crate::storage::{LedgerRow, LedgerStore, StoreError};

/// Ledger backed by CSV exports of the loan and expense tables.
///
/// Files are re-read on every fetch so each call sees the current export.
/// Parsing happens on the blocking pool.
#[derive(Debug, Clone)]
pub struct CsvLedger {
    loans_path: PathBuf,
    expenses_path: Option<PathBuf>
}

impl CsvLedger {
    pub fn new(loans_path: impl Into<PathBuf>) -> Self {
        Self {
            loans_path: loans_path.into(),
            expenses_path: None
        }
    }

    pub fn with_expenses(mut self, expenses_path: impl Into<PathBuf>) -> Self {
        self.expenses_path = Some(expenses_path.into());
        self
    }
}

impl LedgerStore for CsvLedger {
    async fn fetch_loans(&self) -> Result<Vec<Loan>, StoreError> {
        read_in_background(self.loans_path.clone()).await
    }

    async fn fetch_expenses(&self) -> Result<Vec<Expense>, StoreError> {
        match &self.expenses_path {
            Some(path) => read_in_background(path.clone()).await,
            None => {
                debug!("No expense ledger configured, returning an empty ledger");
                Ok(Vec::new())
            }
        }
    }
}

async fn read_in_background<T: LedgerRow + DeserializeOwned>(path: PathBuf) -> Result<Vec<T>, StoreError> {
    spawn_blocking(move || read_rows(&path)).await?
}

/// Reads every well-formed row. Malformed rows are logged and skipped, and a
/// repeated key keeps the first row seen.
fn read_rows<T: LedgerRow + DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let file = File::open(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source
    })?;

    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for result in reader.deserialize::<T>() {
        match result {
            Ok(row) => {
                if seen.insert(row.key()) {
                    rows.push(row);
                } else {
                    warn!("Duplicate {} [{}] in {}, keeping the first row", T::KIND, row.key(), path.display());
                }
            }
            Err(error) => {
                error!("CSV deserialization error in {}: {error}", path.display());
            }
        }
    }

    rows.sort_by_key(|row| row.key());
    debug!("Read {} {} rows from {}", rows.len(), T::KIND, path.display());

    Ok(rows)
}
