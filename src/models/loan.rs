use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::models::label_or_unknown;
use crate::types::{deserialize_optional_date, or_zero, LoanNumber, LoanStatus};

/// Represents a single row of the loan ledger.
///
/// Every column other than the loan number is nullable in the ledger. Field
/// declaration order is the column order used when exporting to CSV.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    /// Unique, immutable ledger key.
    pub loan_number: LoanNumber,
    /// Segment label such as `Vyapari` or `Private`.
    #[serde(default)]
    pub customer_type: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    /// Appraised value of the pledged collateral.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub valuation: Option<Decimal>,
    /// Disbursed principal.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub loan_amount: Option<Decimal>,
    /// Loan-to-value percentage at origination.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub ltv_given: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub date_of_disbursement: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub date_of_release: Option<NaiveDate>,
    #[serde(default, rename = "released")]
    pub status: LoanStatus,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub interest_rate: Option<Decimal>,
    /// Interest realized on the loan, used for yield.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub interest_amount: Option<Decimal>,
    /// Principal still outstanding.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub pending_loan_amount: Option<Decimal>,
    /// Cumulative interest collected so far.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub interest_deposited_till_date: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub last_date_of_interest_deposit: Option<NaiveDate>
}

impl Loan {
    /// Creates an active loan with every nullable column empty.
    pub fn new(loan_number: LoanNumber) -> Self {
        Self {
            loan_number,
            ..Default::default()
        }
    }

    /// Segment label, with blank values folded into `Unknown`.
    pub fn segment(&self) -> &str {
        label_or_unknown(self.customer_type.as_deref())
    }

    pub fn customer(&self) -> &str {
        label_or_unknown(self.customer_name.as_deref())
    }

    /// Principal repaid so far; each operand is independently null-as-zero.
    pub fn principal_paid(&self) -> Decimal {
        let disbursed = or_zero(self.loan_amount);
        let pending = or_zero(self.pending_loan_amount);

        disbursed.checked_sub(pending).unwrap_or_else(|| {
            error!("Decimal subtraction error: Overflow paying down loan [{}]", self.loan_number);
            Decimal::ZERO
        })
    }

    /// Interest actually collected, falling back to the charged interest when
    /// nothing was deposited.
    pub fn realized_interest(&self) -> Decimal {
        match self.interest_deposited_till_date {
            Some(deposited) if deposited > Decimal::ZERO => deposited,
            _ => or_zero(self.interest_amount)
        }
    }

    /// Days between disbursement and release, when both dates are known.
    pub fn holding_days(&self) -> Option<i64> {
        let disbursed = self.date_of_disbursement?;
        let released = self.date_of_release?;

        Some((released - disbursed).num_days())
    }
}
