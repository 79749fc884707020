//! Per-wallet reconciliation for the treasury ledger pipeline.
//!
//! This crate turns one wallet's normalized transfers into its reconciled
//! ledger and quarterly summary:
//! - Counterparty classification (registry lookup, hash overrides, sign
//!   convention, acquaintance)
//! - Quarter aggregation
//! - Balance carryforward (unspent rows and interquarter snapshots)
//! - Quarterly presentation ordering

pub mod aggregate;
pub mod balances;
pub mod classify;
pub mod sort;

pub use aggregate::group_by_quarter;
pub use balances::{interquarter_rows, unspent_rows};
pub use classify::{classify, needs_sign_flip};
pub use sort::sort_quarterly;
