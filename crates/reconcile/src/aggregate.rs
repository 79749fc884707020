//! Quarter aggregation.

use std::collections::BTreeMap;

use treasury_core::{quarter_label, Asset, LedgerEntry, QuarterRow, WETH_CONTRACT};

/// Sum acquainted, non-bridge transfers into (quarter, pair, asset) buckets.
///
/// Missing values are excluded from sums rather than treated as zero.
/// Output is ordered by (quarter, from-category, to-category, symbol).
pub fn group_by_quarter(entries: &[LedgerEntry]) -> Vec<QuarterRow> {
    let mut buckets: BTreeMap<(String, String, String, &'static str), (Asset, f64, f64)> =
        BTreeMap::new();

    for entry in entries {
        if !entry.acquainted || entry.touches_category(WETH_CONTRACT) {
            continue;
        }
        let key = (
            quarter_label(entry.date),
            entry.from_category.clone(),
            entry.to_category.clone(),
            entry.symbol.as_str(),
        );
        let bucket = buckets.entry(key).or_insert((entry.symbol, 0.0, 0.0));
        if let Some(v) = entry.value {
            bucket.1 += v;
        }
        if let Some(u) = entry.usd {
            bucket.2 += u;
        }
    }

    buckets
        .into_iter()
        .map(|((quarter, from, to, _), (symbol, value, usd))| QuarterRow {
            quarter,
            from,
            to,
            symbol,
            value,
            usd,
        })
        .collect()
}
