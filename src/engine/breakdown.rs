use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Loan;
use crate::types::{accumulate, or_zero};

/// Number of customers kept by the top-customer ranking unless overridden.
pub const DEFAULT_TOP_CUSTOMERS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummary {
    pub year: i32,
    pub disbursed_count: usize,
    pub disbursed_amount: Decimal,
    pub released_count: usize,
    pub released_amount: Decimal,
    /// Realized interest of loans released in this year.
    pub interest_amount: Decimal
}

/// Disbursements grouped by disbursement year and releases by release year,
/// in ascending year order.
pub fn yearly_breakdown(loans: &[Loan]) -> Vec<YearSummary> {
    let mut years: BTreeMap<i32, YearSummary> = BTreeMap::new();

    for loan in loans {
        if let Some(disbursed) = loan.date_of_disbursement {
            let summary = year_entry(&mut years, disbursed.year());
            summary.disbursed_count += 1;
            accumulate(&mut summary.disbursed_amount, or_zero(loan.loan_amount));
        }

        if !loan.status.is_released() {
            continue;
        }

        if let Some(released) = loan.date_of_release {
            let summary = year_entry(&mut years, released.year());
            summary.released_count += 1;
            accumulate(&mut summary.released_amount, or_zero(loan.loan_amount));
            accumulate(&mut summary.interest_amount, or_zero(loan.interest_amount));
        }
    }

    years.into_values().collect()
}

fn year_entry(years: &mut BTreeMap<i32, YearSummary>, year: i32) -> &mut YearSummary {
    years.entry(year).or_insert_with(|| YearSummary {
        year,
        ..Default::default()
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerExposure {
    pub customer: String,
    pub loan_count: usize,
    pub total_amount: Decimal,
    pub active_count: usize,
    /// Pending principal across the customer's active loans.
    pub outstanding_amount: Decimal
}

/// Largest customers by disbursed amount, optionally within one segment.
///
/// Ties on amount are broken by customer name so the ranking is stable.
pub fn top_customers(loans: &[Loan], segment: Option<&str>, limit: usize) -> Vec<CustomerExposure> {
    let mut customers: HashMap<&str, CustomerExposure> = HashMap::new();

    let in_segment = loans.iter()
        .filter(|loan| segment.is_none_or(|segment| loan.segment() == segment));

    for loan in in_segment {
        let exposure = customers.entry(loan.customer()).or_insert_with(|| CustomerExposure {
            customer: loan.customer().to_string(),
            ..Default::default()
        });

        exposure.loan_count += 1;
        accumulate(&mut exposure.total_amount, or_zero(loan.loan_amount));

        if loan.status.is_active() {
            exposure.active_count += 1;
            accumulate(&mut exposure.outstanding_amount, or_zero(loan.pending_loan_amount));
        }
    }

    let mut ranked: Vec<CustomerExposure> = customers.into_values().collect();
    ranked.sort_by(|a, b| match b.total_amount.cmp(&a.total_amount) {
        Ordering::Equal => a.customer.cmp(&b.customer),
        ordering => ordering
    });
    ranked.truncate(limit);

    ranked
}
