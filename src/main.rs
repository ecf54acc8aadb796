mod cli;

use std::io::{stderr, stdout, BufWriter, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use loan_ledger_analytics::engine::Dashboard;
use loan_ledger_analytics::export::write_csv;
use loan_ledger_analytics::storage::{CachedLedger, CsvLedger, LedgerStore};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.log_level.into());

    let mut ledger = CsvLedger::new(&cli.loans);
    if let Some(expenses) = &cli.expenses {
        ledger = ledger.with_expenses(expenses);
    }

    let store = Arc::new(CachedLedger::with_ttl(Arc::new(ledger), Duration::from_secs(cli.cache_ttl_secs)));
    let dashboard = Dashboard::new(store.clone()).with_top_customer_limit(cli.top_customers);

    let timer = Instant::now();

    match &cli.command {
        Command::Summary => write_json(&dashboard.portfolio_report().await?)?,
        Command::Segment { name } => write_json(&dashboard.segment_report(name).await?)?,
        Command::Expenses => write_json(&dashboard.expense_report().await?)?,
        Command::Quality { as_of } => write_json(&dashboard.quality_report(as_of_or_today(*as_of)).await?)?,
        Command::Overview { as_of } => write_json(&dashboard.overview(as_of_or_today(*as_of)).await?)?,
        Command::ExportLoans { .. } => {
            let filters = cli.command.loan_filters();
            let loans: Vec<_> = store.fetch_loans().await?
                .into_iter()
                .filter(|loan| filters.iter().all(|filter| filter.matches(loan)))
                .collect();

            let rows = write_csv(BufWriter::new(stdout().lock()), &loans)?;
            info!("Exported {rows} loans");
        }
        Command::ExportExpenses => {
            let expenses = store.fetch_expenses().await?;

            let rows = write_csv(BufWriter::new(stdout().lock()), &expenses)?;
            info!("Exported {rows} expenses");
        }
    }

    info!("Completed in: {:?}", timer.elapsed());

    Ok(())
}

fn as_of_or_today(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| Local::now().date_naive())
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Reports go to stdout so they can be redirected, logging stays on stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_json<T: Serialize>(report: &T) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    serde_json::to_writer_pretty(&mut output, report)?;
    writeln!(output)?;

    output.flush()?;

    Ok(())
}
