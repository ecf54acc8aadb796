use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::models::{Loan, LoanAmountField};
use crate::types::{accumulate, or_zero, safe_divide, sum_or_zero};

/// Number of loans kept by the recent-payments ranking.
pub const RECENT_PAYMENTS_LIMIT: usize = 20;

/// Null-as-zero sum of one amount column over a snapshot.
pub fn sum_field(loans: &[Loan], field: LoanAmountField) -> Decimal {
    sum_or_zero(loans.iter().map(|loan| field.value(loan)))
}

/// Headline counts and sums over the whole loan ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    pub total_loans: usize,
    pub active_loans: usize,
    /// Derived as `total_loans - active_loans`.
    pub released_loans: usize,
    pub total_disbursed: Decimal,
    pub total_outstanding: Decimal,
    pub total_interest_received: Decimal
}

pub fn portfolio_totals(loans: &[Loan]) -> PortfolioTotals {
    let total_loans = loans.len();
    let active_loans = loans.iter().filter(|loan| loan.status.is_active()).count();

    PortfolioTotals {
        total_loans,
        active_loans,
        released_loans: total_loans - active_loans,
        total_disbursed: sum_field(loans, LoanAmountField::LoanAmount),
        total_outstanding: sum_field(loans, LoanAmountField::PendingLoanAmount),
        total_interest_received: sum_field(loans, LoanAmountField::InterestDepositedTillDate)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentStats {
    pub count: usize,
    pub total_amount: Decimal,
    pub total_outstanding: Decimal
}

/// Per-segment rollup, iterated in order of each segment's first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentRollup {
    segments: Vec<(String, SegmentStats)>
}

impl SegmentRollup {
    pub fn get(&self, segment: &str) -> Option<&SegmentStats> {
        self.segments.iter()
            .find(|(label, _)| label == segment)
            .map(|(_, stats)| stats)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SegmentStats)> {
        self.segments.iter().map(|(label, stats)| (label.as_str(), stats))
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Serialize for SegmentRollup {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.segments.len()))?;

        for (label, stats) in &self.segments {
            map.serialize_entry(label, stats)?;
        }

        map.end()
    }
}

pub fn segment_rollup(loans: &[Loan]) -> SegmentRollup {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut segments: Vec<(String, SegmentStats)> = Vec::new();

    for loan in loans {
        let label = loan.segment();
        let position = *positions.entry(label).or_insert_with(|| {
            segments.push((label.to_string(), SegmentStats::default()));
            segments.len() - 1
        });

        let stats = &mut segments[position].1;
        stats.count += 1;
        accumulate(&mut stats.total_amount, or_zero(loan.loan_amount));
        accumulate(&mut stats.total_outstanding, or_zero(loan.pending_loan_amount));
    }

    SegmentRollup { segments }
}

/// Fixed LTV bands. Each band includes its upper boundary.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum LtvBucket {
    UpTo50,
    Over50To70,
    Over70To85,
    Over85
}

impl LtvBucket {
    pub const ALL: [LtvBucket; 4] = [LtvBucket::UpTo50, LtvBucket::Over50To70, LtvBucket::Over70To85, LtvBucket::Over85];

    /// A missing LTV is bucketed as zero.
    pub fn from_ltv(ltv: Option<Decimal>) -> Self {
        let ltv = or_zero(ltv);

        if ltv <= Decimal::from(50) {
            LtvBucket::UpTo50
        } else if ltv <= Decimal::from(70) {
            LtvBucket::Over50To70
        } else if ltv <= Decimal::from(85) {
            LtvBucket::Over70To85
        } else {
            LtvBucket::Over85
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LtvBucket::UpTo50 => "0-50",
            LtvBucket::Over50To70 => "50-70",
            LtvBucket::Over70To85 => "70-85",
            LtvBucket::Over85 => "85+"
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LtvDistribution {
    counts: [usize; 4]
}

impl LtvDistribution {
    pub fn count(&self, bucket: LtvBucket) -> usize {
        self.counts[bucket.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl Serialize for LtvDistribution {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(LtvBucket::ALL.len()))?;

        for bucket in LtvBucket::ALL {
            map.serialize_entry(bucket.label(), &self.count(bucket))?;
        }

        map.end()
    }
}

pub fn ltv_distribution(loans: &[Loan]) -> LtvDistribution {
    let mut distribution = LtvDistribution::default();

    for loan in loans {
        distribution.counts[LtvBucket::from_ltv(loan.ltv_given).index()] += 1;
    }

    distribution
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMetrics {
    /// Loans with strictly positive interest deposited.
    pub loans_with_payments: usize,
    pub avg_payment_per_loan: Decimal,
    pub total_principal_paid: Decimal
}

pub fn payment_metrics(loans: &[Loan]) -> PaymentMetrics {
    let deposits: Vec<Decimal> = loans.iter()
        .filter_map(|loan| loan.interest_deposited_till_date)
        .filter(|deposited| *deposited > Decimal::ZERO)
        .collect();

    let loans_with_payments = deposits.len();
    let deposited = sum_or_zero(deposits.into_iter().map(Some));

    let mut total_principal_paid = Decimal::ZERO;
    for loan in loans {
        accumulate(&mut total_principal_paid, loan.principal_paid());
    }

    PaymentMetrics {
        loans_with_payments,
        avg_payment_per_loan: safe_divide(deposited, Decimal::from(loans_with_payments)),
        total_principal_paid
    }
}

/// Loans with a recorded interest deposit, most recent first, capped at
/// [`RECENT_PAYMENTS_LIMIT`]. Order among equal dates is unspecified.
pub fn recent_payments(loans: &[Loan]) -> Vec<&Loan> {
    let mut paid: Vec<&Loan> = loans.iter()
        .filter(|loan| loan.last_date_of_interest_deposit.is_some())
        .collect();

    paid.sort_unstable_by(|a, b| b.last_date_of_interest_deposit.cmp(&a.last_date_of_interest_deposit));
    paid.truncate(RECENT_PAYMENTS_LIMIT);

    paid
}
