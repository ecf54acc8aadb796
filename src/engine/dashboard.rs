use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::engine::breakdown::{top_customers, yearly_breakdown, CustomerExposure, YearSummary, DEFAULT_TOP_CUSTOMERS};
use crate::engine::expenses::{expense_summary, ExpenseSummary};
use crate::engine::portfolio::{
    ltv_distribution, payment_metrics, portfolio_totals, recent_payments, segment_rollup, LtvDistribution,
    PaymentMetrics, PortfolioTotals, SegmentRollup
};
use crate::engine::quality::{data_quality, DataQualityReport};
use crate::engine::yields::{portfolio_yield, PortfolioYield};
use crate::models::{Loan, LoanFilter};
use crate::storage::{LedgerStore, StoreError};

/// Every portfolio metric, computed from a single loan snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    pub portfolio: PortfolioTotals,
    pub segments: SegmentRollup,
    pub ltv_distribution: LtvDistribution,
    pub payments: PaymentMetrics,
    pub recent_payments: Vec<Loan>,
    pub portfolio_yield: PortfolioYield,
    pub yearly: Vec<YearSummary>,
    pub top_customers: Vec<CustomerExposure>
}

impl PortfolioReport {
    pub fn from_loans(loans: &[Loan], top_customer_limit: usize) -> Self {
        Self {
            portfolio: portfolio_totals(loans),
            segments: segment_rollup(loans),
            ltv_distribution: ltv_distribution(loans),
            payments: payment_metrics(loans),
            recent_payments: recent_payments(loans).into_iter().cloned().collect(),
            portfolio_yield: portfolio_yield(loans),
            yearly: yearly_breakdown(loans),
            top_customers: top_customers(loans, None, top_customer_limit)
        }
    }
}

/// Metrics restricted to one customer segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentReport {
    pub segment: String,
    pub totals: PortfolioTotals,
    pub ltv_distribution: LtvDistribution,
    pub payments: PaymentMetrics,
    pub top_customers: Vec<CustomerExposure>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub as_of: NaiveDate,
    pub portfolio: PortfolioReport,
    pub expenses: ExpenseSummary,
    pub quality: DataQualityReport
}

/// Entry point for reports. The ledger is injected so any store, including an
/// in-memory fixture, can back it.
pub struct Dashboard<S> {
    store: Arc<S>,
    top_customer_limit: usize
}

impl<S: LedgerStore> Dashboard<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            top_customer_limit: DEFAULT_TOP_CUSTOMERS
        }
    }

    pub fn with_top_customer_limit(mut self, limit: usize) -> Self {
        self.top_customer_limit = limit;
        self
    }

    pub async fn portfolio_report(&self) -> Result<PortfolioReport, StoreError> {
        let loans = self.store.fetch_loans().await?;

        Ok(self.build_portfolio_report(&loans))
    }

    pub async fn segment_report(&self, segment: &str) -> Result<SegmentReport, StoreError> {
        let filter = LoanFilter::CustomerType(segment.to_string());
        let loans = self.store.fetch_loans_where(&filter).await?;

        debug!("Segment [{segment}] matched {} loans", loans.len());

        Ok(SegmentReport {
            segment: segment.to_string(),
            totals: portfolio_totals(&loans),
            ltv_distribution: ltv_distribution(&loans),
            payments: payment_metrics(&loans),
            top_customers: top_customers(&loans, Some(segment), self.top_customer_limit)
        })
    }

    pub async fn expense_report(&self) -> Result<ExpenseSummary, StoreError> {
        let expenses = self.store.fetch_expenses().await?;

        Ok(expense_summary(&expenses))
    }

    pub async fn quality_report(&self, as_of: NaiveDate) -> Result<DataQualityReport, StoreError> {
        let loans = self.store.fetch_loans().await?;

        Ok(data_quality(&loans, as_of))
    }

    /// Portfolio, expense and quality reports; both ledgers are fetched concurrently.
    pub async fn overview(&self, as_of: NaiveDate) -> Result<Overview, StoreError> {
        let (loans, expenses) = tokio::try_join!(self.store.fetch_loans(), self.store.fetch_expenses())?;

        Ok(Overview {
            as_of,
            portfolio: self.build_portfolio_report(&loans),
            expenses: expense_summary(&expenses),
            quality: data_quality(&loans, as_of)
        })
    }

    fn build_portfolio_report(&self, loans: &[Loan]) -> PortfolioReport {
        let timer = Instant::now();
        let report = PortfolioReport::from_loans(loans, self.top_customer_limit);

        info!("Aggregated {} loans in: {:?}", loans.len(), timer.elapsed());

        report
    }
}
