use super::{write_csv, CsvColumns};

use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Expense, Loan};
use crate::types::LoanStatus;

fn export_to_string<T: serde::Serialize + CsvColumns>(records: &[T]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, records)?;
    Ok(String::from_utf8(buffer)?)
}

fn header_of(output: &str) -> Result<&str> {
    output.lines().next().ok_or_else(|| anyhow!("export produced no lines"))
}

#[test]
fn test_empty_export_writes_header_only() -> Result<()> {
    let output = export_to_string::<Loan>(&[])?;

    assert_eq!(output.lines().count(), 1);
    assert_eq!(header_of(&output)?, Loan::COLUMNS.join(","));

    let output = export_to_string::<Expense>(&[])?;

    assert_eq!(output.trim_end(), Expense::COLUMNS.join(","));

    Ok(())
}

#[test]
fn test_declared_columns_match_serialized_field_order() -> Result<()> {
    let loans = export_to_string(&[Loan::new(1)])?;
    assert_eq!(header_of(&loans)?, Loan::COLUMNS.join(","));

    let expenses = export_to_string(&[Expense::new(1)])?;
    assert_eq!(header_of(&expenses)?, Expense::COLUMNS.join(","));

    Ok(())
}

#[test]
fn test_loan_export_writes_flags_dates_and_nulls() -> Result<()> {
    let mut released = Loan::new(2);
    released.customer_type = Some("Vyapari".to_string());
    released.loan_amount = Some(Decimal::from_str("50000.00")?);
    released.status = LoanStatus::Released;
    released.date_of_release = NaiveDate::from_ymd_opt(2024, 3, 1);

    let output = export_to_string(&[Loan::new(1), released])?;
    let rows: Vec<&str> = output.lines().skip(1).collect();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], "1,,,,,,,,,FALSE,,,,,");
    assert_eq!(rows[1], "2,Vyapari,,,,50000.00,,,2024-03-01,TRUE,,,,,");

    Ok(())
}

#[test]
fn test_exported_loans_read_back_unchanged() -> Result<()> {
    let mut loan = Loan::new(9);
    loan.customer_name = Some("Sita, Devi".to_string());
    loan.ltv_given = Some(Decimal::from_str("72.50")?);
    loan.last_date_of_interest_deposit = NaiveDate::from_ymd_opt(2024, 5, 20);

    let output = export_to_string(&[loan.clone()])?;
    let mut reader = csv::Reader::from_reader(output.as_bytes());
    let read_back: Loan = reader.deserialize().next().ok_or_else(|| anyhow!("row missing"))??;

    assert_eq!(read_back, loan);

    Ok(())
}
