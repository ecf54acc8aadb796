use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{label_or_unknown, Expense};
use crate::types::{accumulate, or_zero, safe_divide, sum_or_zero};

/// Number of expense lines kept by the largest-expenses ranking.
pub const TOP_EXPENSES_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTotal {
    pub ledger: String,
    pub count: usize,
    pub total_amount: Decimal
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub count: usize,
    pub total_amount: Decimal,
    /// Mean over lines that carry an amount.
    pub average_amount: Decimal,
    pub distinct_ledgers: usize,
    pub by_ledger: Vec<LedgerTotal>,
    pub top_expenses: Vec<Expense>
}

pub fn expense_summary(expenses: &[Expense]) -> ExpenseSummary {
    let priced = expenses.iter().filter(|expense| expense.amount.is_some()).count();
    let total_amount = sum_or_zero(expenses.iter().map(|expense| expense.amount));

    let distinct_ledgers = expenses.iter()
        .filter_map(|expense| expense.ledger.as_deref())
        .filter(|ledger| !ledger.trim().is_empty())
        .collect::<HashSet<_>>()
        .len();

    ExpenseSummary {
        count: expenses.len(),
        total_amount,
        average_amount: safe_divide(total_amount, Decimal::from(priced)),
        distinct_ledgers,
        by_ledger: ledger_totals(expenses),
        top_expenses: largest_expenses(expenses)
    }
}

fn ledger_totals(expenses: &[Expense]) -> Vec<LedgerTotal> {
    let mut ledgers: HashMap<&str, LedgerTotal> = HashMap::new();

    for expense in expenses {
        let label = label_or_unknown(expense.ledger.as_deref());
        let total = ledgers.entry(label).or_insert_with(|| LedgerTotal {
            ledger: label.to_string(),
            ..Default::default()
        });

        total.count += 1;
        accumulate(&mut total.total_amount, or_zero(expense.amount));
    }

    let mut totals: Vec<LedgerTotal> = ledgers.into_values().collect();
    totals.sort_by(|a, b| match b.total_amount.cmp(&a.total_amount) {
        Ordering::Equal => a.ledger.cmp(&b.ledger),
        ordering => ordering
    });

    totals
}

fn largest_expenses(expenses: &[Expense]) -> Vec<Expense> {
    let mut priced: Vec<&Expense> = expenses.iter()
        .filter(|expense| expense.amount.is_some())
        .collect();

    priced.sort_by(|a, b| match b.amount.cmp(&a.amount) {
        Ordering::Equal => a.id.cmp(&b.id),
        ordering => ordering
    });

    priced.into_iter()
        .take(TOP_EXPENSES_LIMIT)
        .cloned()
        .collect()
}
