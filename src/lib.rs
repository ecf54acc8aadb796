//! Portfolio, payment and yield analytics over a gold-loan ledger.
//!
//! Loans and expenses are read through a [`storage::LedgerStore`], aggregated
//! by the pure functions in [`engine`] and served as reports by
//! [`engine::Dashboard`].

pub mod engine;
pub mod export;
pub mod models;
pub mod storage;
pub mod types;
