use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Loan;
use crate::types::or_zero;

/// Counts of ledger rows that break the ledger's expected shape.
///
/// None of these rows are excluded from aggregation; the report only makes
/// them visible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityReport {
    pub total_loans: usize,
    pub missing_loan_amount: usize,
    pub missing_disbursement_date: usize,
    pub missing_customer_type: usize,
    pub negative_loan_amounts: usize,
    /// Disbursed after the `as_of` date.
    pub future_disbursements: usize,
    /// Active loans whose pending principal exceeds the disbursed principal.
    pub outstanding_exceeds_principal: usize
}

pub fn data_quality(loans: &[Loan], as_of: NaiveDate) -> DataQualityReport {
    DataQualityReport {
        total_loans: loans.len(),
        missing_loan_amount: count_where(loans, |loan| loan.loan_amount.is_none()),
        missing_disbursement_date: count_where(loans, |loan| loan.date_of_disbursement.is_none()),
        missing_customer_type: count_where(loans, |loan| loan.customer_type.as_deref().is_none_or(|value| value.trim().is_empty())),
        negative_loan_amounts: count_where(loans, |loan| loan.loan_amount.is_some_and(|amount| amount < Decimal::ZERO)),
        future_disbursements: count_where(loans, |loan| loan.date_of_disbursement.is_some_and(|date| date > as_of)),
        outstanding_exceeds_principal: count_where(loans, |loan| {
            loan.status.is_active() && or_zero(loan.pending_loan_amount) > or_zero(loan.loan_amount)
        })
    }
}

fn count_where(loans: &[Loan], predicate: impl Fn(&Loan) -> bool) -> usize {
    loans.iter().filter(|&loan| predicate(loan)).count()
}
