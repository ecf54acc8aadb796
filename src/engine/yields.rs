use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Loan;
use crate::types::{accumulate, checked_product, or_zero, safe_divide};

const DAYS_PER_YEAR: i64 = 365;
const PERCENT: i64 = 100;

/// Realized return on released loans, measured at portfolio level.
///
/// The yield is computed from the aggregate interest and capital, annualized
/// by the capital-weighted holding period, rather than by averaging per-loan
/// yields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioYield {
    /// Released loans with positive capital and a positive holding period.
    pub loan_count: usize,
    /// Interest deposited, or interest charged where nothing was deposited.
    pub total_interest: Decimal,
    pub total_capital: Decimal,
    pub weighted_avg_days: Decimal,
    pub simple_return_pct: Decimal,
    pub portfolio_yield_pct: Decimal
}

/// Loans that qualify for yield: released, funded and held for at least a day.
fn yield_eligible(loan: &Loan) -> Option<(Decimal, i64)> {
    if !loan.status.is_released() {
        return None;
    }

    let capital = or_zero(loan.loan_amount);
    let days = loan.holding_days()?;

    (capital > Decimal::ZERO && days > 0).then_some((capital, days))
}

/// `sum(amount * days) / sum(amount)` over eligible loans, zero when no capital.
pub fn weighted_average_days(loans: &[Loan]) -> Decimal {
    let mut weighted = Decimal::ZERO;
    let mut capital = Decimal::ZERO;

    for (amount, days) in loans.iter().filter_map(yield_eligible) {
        let Some(amount_days) = checked_product(amount, Decimal::from(days)) else {
            continue;
        };

        accumulate(&mut weighted, amount_days);
        accumulate(&mut capital, amount);
    }

    safe_divide(weighted, capital)
}

pub fn portfolio_yield(loans: &[Loan]) -> PortfolioYield {
    let eligible: Vec<&Loan> = loans.iter()
        .filter(|loan| yield_eligible(loan).is_some())
        .collect();

    if eligible.is_empty() {
        return PortfolioYield::default();
    }

    let mut total_interest = Decimal::ZERO;
    let mut total_capital = Decimal::ZERO;

    for loan in &eligible {
        accumulate(&mut total_interest, loan.realized_interest());
        accumulate(&mut total_capital, or_zero(loan.loan_amount));
    }

    let weighted_avg_days = weighted_average_days(loans);
    let return_ratio = safe_divide(total_interest, total_capital);

    PortfolioYield {
        loan_count: eligible.len(),
        total_interest,
        total_capital,
        weighted_avg_days,
        simple_return_pct: as_percent(return_ratio),
        portfolio_yield_pct: as_percent(safe_divide(annualized(return_ratio), weighted_avg_days))
    }
}

fn annualized(ratio: Decimal) -> Decimal {
    checked_product(ratio, Decimal::from(DAYS_PER_YEAR)).unwrap_or(Decimal::ZERO)
}

fn as_percent(ratio: Decimal) -> Decimal {
    checked_product(ratio, Decimal::from(PERCENT)).unwrap_or(Decimal::ZERO)
}
