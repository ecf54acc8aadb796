mod expense;
mod filter;
mod loan;

pub use expense::Expense;
pub use filter::{LoanAmountField, LoanFilter};
pub use loan::Loan;

/// Segment and customer label used when the ledger leaves the column blank.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Missing, empty and whitespace-only labels all count as blank.
pub(crate) fn label_or_unknown(label: Option<&str>) -> &str {
    match label {
        Some(value) if !value.trim().is_empty() => value,
        _ => UNKNOWN_LABEL
    }
}
