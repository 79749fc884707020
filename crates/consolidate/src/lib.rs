//! Cross-entity consolidation for the treasury ledger pipeline.
//!
//! This crate merges the per-wallet reconciled ledgers into one globally
//! ordered ledger:
//! - Counterparty filtering (bridge contract, swap routers, denylist)
//! - Cross-wallet deduplication of shared transfers
//! - Placeholder checkpoint injection and rewrite
//! - Entity-priority total ordering

pub mod consolidator;
pub mod ordering;
pub mod row;

pub use consolidator::{consolidate, dedup_entries};
pub use ordering::{priority, sort_key};
pub use row::ConsolidatedRow;
