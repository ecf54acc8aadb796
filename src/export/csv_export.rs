use std::io::Write;

use csv::WriterBuilder;
use serde::Serialize;
use tracing::debug;

use crate::export::ExportError;
use crate::models::{Expense, Loan};

/// Column names of an exportable record, in field declaration order.
///
/// Non-empty exports take their header from the serialized record itself;
/// this list is only written when there is no record to derive it from.
pub trait CsvColumns {
    const COLUMNS: &'static [&'static str];
}

impl CsvColumns for Loan {
    const COLUMNS: &'static [&'static str] = &[
        "loan_number",
        "customer_type",
        "customer_name",
        "customer_id",
        "valuation",
        "loan_amount",
        "ltv_given",
        "date_of_disbursement",
        "date_of_release",
        "released",
        "interest_rate",
        "interest_amount",
        "pending_loan_amount",
        "interest_deposited_till_date",
        "last_date_of_interest_deposit"
    ];
}

impl CsvColumns for Expense {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "date",
        "item",
        "amount",
        "payment_mode",
        "bank",
        "ledger",
        "invoice_no",
        "receipt",
        "user"
    ];
}

/// Writes `records` as CSV and returns the number of data rows written.
///
/// An empty collection produces a header-only document.
pub fn write_csv<W, T>(output: W, records: &[T]) -> Result<usize, ExportError>
where
    W: Write,
    T: Serialize + CsvColumns,
{
    let mut writer = WriterBuilder::new().from_writer(output);

    if records.is_empty() {
        debug!("Nothing to export, writing header only");
        writer.write_record(T::COLUMNS)?;
    }

    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;

    Ok(records.len())
}
