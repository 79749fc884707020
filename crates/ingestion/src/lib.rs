//! Raw export normalization for the treasury ledger pipeline.
//!
//! This crate handles:
//! - ERC-20 transfer export parsing (allow-list, WETH remap, USD fallback)
//! - Internal ETH transfer export parsing (signed value derivation)
//! - Per-wallet stream union and noise filtering

mod cells;
pub mod erc20;
pub mod internal;
pub mod merge;

pub use erc20::parse_erc20;
pub use internal::{parse_internal, signed_value};
pub use merge::merge_transfers;
