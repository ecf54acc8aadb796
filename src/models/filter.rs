use rust_decimal::Decimal;

use crate::models::Loan;
use crate::types::LoanStatus;

/// Equality predicate used by filtered store queries.
#[derive(Debug, Clone, PartialEq)]
pub enum LoanFilter {
    Status(LoanStatus),
    /// Matches on the segment label, so `Unknown` selects loans with no type.
    CustomerType(String),
    CustomerId(String),
    CustomerName(String)
}

impl LoanFilter {
    pub fn matches(&self, loan: &Loan) -> bool {
        match self {
            LoanFilter::Status(status) => loan.status == *status,
            LoanFilter::CustomerType(segment) => loan.segment() == segment,
            LoanFilter::CustomerId(id) => loan.customer_id.as_deref() == Some(id.as_str()),
            LoanFilter::CustomerName(name) => loan.customer_name.as_deref() == Some(name.as_str())
        }
    }
}

/// Numeric loan columns that can be summed by the store.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LoanAmountField {
    LoanAmount,
    PendingLoanAmount,
    InterestDepositedTillDate,
    InterestAmount
}

impl LoanAmountField {
    pub fn value(&self, loan: &Loan) -> Option<Decimal> {
        match self {
            LoanAmountField::LoanAmount => loan.loan_amount,
            LoanAmountField::PendingLoanAmount => loan.pending_loan_amount,
            LoanAmountField::InterestDepositedTillDate => loan.interest_deposited_till_date,
            LoanAmountField::InterestAmount => loan.interest_amount
        }
    }
}
