//! Per-wallet stream union and noise filtering.

use treasury_core::{Asset, Transfer};

/// Merge one wallet's normalized ERC-20 and internal streams.
///
/// Sorts by date (stable, so same-day rows keep their source order) and
/// drops zero-value rows, the USDC value-of-exactly-1 test artifact, and
/// self-transfers. Rows with a missing value are retained. Pure filter, no
/// aggregation.
pub fn merge_transfers(erc20: Vec<Transfer>, internal: Vec<Transfer>) -> Vec<Transfer> {
    let mut merged: Vec<Transfer> = erc20.into_iter().chain(internal).collect();
    merged.sort_by_key(|t| t.date);
    merged.retain(|t| {
        let zero = t.value == Some(0.0);
        let test_artifact = t.symbol == Asset::Usdc && t.value == Some(1.0);
        let self_transfer = t.from == t.to;
        !(zero || test_artifact || self_transfer)
    });
    merged
}
