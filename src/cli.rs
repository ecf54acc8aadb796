use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::level_filters::LevelFilter;

use loan_ledger_analytics::engine::DEFAULT_TOP_CUSTOMERS;
use loan_ledger_analytics::models::LoanFilter;
use loan_ledger_analytics::types::LoanStatus;

/// Portfolio, payment and yield analytics over a gold-loan ledger.
#[derive(Debug, Parser)]
#[command(name = "loan-ledger-analytics")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// CSV export of the loan ledger
    #[arg(long, env = "LOAN_LEDGER_LOANS")]
    pub loans: PathBuf,

    /// CSV export of the expense ledger
    #[arg(long, env = "LOAN_LEDGER_EXPENSES")]
    pub expenses: Option<PathBuf>,

    /// Verbosity of the log written to stderr
    #[arg(long, value_enum, env = "LOAN_LEDGER_LOG", default_value = "error")]
    pub log_level: LogLevel,

    /// Seconds a ledger snapshot is reused before the files are read again
    #[arg(long, default_value_t = 300)]
    pub cache_ttl_secs: u64,

    /// Number of customers listed in exposure rankings
    #[arg(long, default_value_t = DEFAULT_TOP_CUSTOMERS)]
    pub top_customers: usize,

    #[command(subcommand)]
    pub command: Command
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Full portfolio report as JSON
    Summary,

    /// Report restricted to one customer segment
    Segment {
        /// Segment label, `Unknown` selects loans without one
        name: String
    },

    /// Expense ledger summary as JSON
    Expenses,

    /// Data quality counts for the loan ledger
    Quality {
        /// Reference date for future-dated checks, defaults to today
        #[arg(long)]
        as_of: Option<NaiveDate>
    },

    /// Portfolio, expense and quality reports together
    Overview {
        #[arg(long)]
        as_of: Option<NaiveDate>
    },

    /// Loan rows as CSV
    ExportLoans {
        #[arg(long, value_enum)]
        status: Option<StatusArg>,

        #[arg(long)]
        segment: Option<String>
    },

    /// Expense rows as CSV
    ExportExpenses
}

impl Command {
    /// Filters requested by `export-loans`, empty for every other command.
    pub fn loan_filters(&self) -> Vec<LoanFilter> {
        let Command::ExportLoans { status, segment } = self else {
            return Vec::new();
        };

        let mut filters = Vec::new();

        if let Some(status) = status {
            filters.push(LoanFilter::Status(status.into_status()));
        }

        if let Some(segment) = segment {
            filters.push(LoanFilter::CustomerType(segment.clone()));
        }

        filters
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Active,
    Released
}

impl StatusArg {
    pub fn into_status(self) -> LoanStatus {
        match self {
            StatusArg::Active => LoanStatus::Active,
            StatusArg::Released => LoanStatus::Released
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    #[default]
    Error
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR
        }
    }
}
