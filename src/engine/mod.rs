mod breakdown;
mod dashboard;
mod expenses;
mod portfolio;
mod quality;
mod yields;

pub use breakdown::{top_customers, yearly_breakdown, CustomerExposure, YearSummary, DEFAULT_TOP_CUSTOMERS};
pub use dashboard::{Dashboard, Overview, PortfolioReport, SegmentReport};
pub use expenses::{expense_summary, ExpenseSummary, LedgerTotal, TOP_EXPENSES_LIMIT};
pub use portfolio::{
    ltv_distribution, payment_metrics, portfolio_totals, recent_payments, segment_rollup, sum_field, LtvBucket,
    LtvDistribution, PaymentMetrics, PortfolioTotals, SegmentRollup, SegmentStats, RECENT_PAYMENTS_LIMIT
};
pub use quality::{data_quality, DataQualityReport};
pub use yields::{portfolio_yield, weighted_average_days, PortfolioYield};
