//! Cross-entity ledger consolidation.
//!
//! Merges every wallet's reconciled ledger (plus its interquarter snapshots)
//! into one globally ordered ledger. Direction is reconstructed downstream
//! purely from sort position, so values are folded to absolute magnitudes
//! here.

use std::collections::HashSet;
use std::mem;

use ordered_float::OrderedFloat;

use treasury_core::{
    LedgerEntry, WalletRegistry, CONSOLIDATION_DENYLIST, ENDOWMENT, ENDOWMENT_FEES,
    INTERQUARTER_HASH, PLACEHOLDER, ROOT_WALLET, STREAM_HASH, WETH_CONTRACT,
};
use treasury_reconcile::interquarter_rows;

use crate::ordering::sort_key;
use crate::row::ConsolidatedRow;

/// Consolidate per-wallet ledgers into the cross-entity ledger.
///
/// Input order matters: deduplication keeps the first occurrence, so the
/// caller's wallet order decides which side of a shared transfer survives.
pub fn consolidate(
    ledgers: &[(String, Vec<LedgerEntry>)],
    registry: &WalletRegistry,
) -> Vec<ConsolidatedRow> {
    let swap_names = registry.swap_names();

    // Each wallet contributes its bridge-filtered ledger followed by the
    // snapshots computed from it; snapshots must see unacquainted rows, so
    // the acquaintance filter comes later.
    let mut combined: Vec<LedgerEntry> = Vec::new();
    for (wallet, entries) in ledgers {
        let kept: Vec<LedgerEntry> = entries
            .iter()
            .filter(|e| !e.touches_category(WETH_CONTRACT))
            .cloned()
            .collect();
        let snapshots = interquarter_rows(&kept, wallet);
        combined.extend(kept);
        combined.extend(snapshots);
    }

    for entry in &mut combined {
        entry.value = entry.value.map(f64::abs);
        entry.usd = entry.usd.map(f64::abs);
    }

    combined.retain(|e| e.acquainted);
    combined.retain(|e| {
        !(swap_names.contains(e.from_name.as_str()) || swap_names.contains(e.to_name.as_str()))
    });
    combined.retain(|e| {
        !(e.touches_name(ENDOWMENT)
            && e.from_category != ENDOWMENT_FEES
            && e.to_category != ENDOWMENT_FEES)
    });
    combined.retain(|e| !CONSOLIDATION_DENYLIST.contains(&e.from_name.as_str()));

    let mut rows: Vec<ConsolidatedRow> =
        dedup_entries(combined).into_iter().map(Into::into).collect();

    let wallets: Vec<&str> = ledgers.iter().map(|(w, _)| w.as_str()).collect();
    let placeholders = placeholder_rows(&rows, &wallets);
    rows.extend(placeholders);

    rows.sort_by_cached_key(sort_key);
    rewrite_placeholders(&mut rows);
    rows
}

/// Drop repeated (hash, from, to, value) transfers, keeping the first.
///
/// A transfer between two tracked wallets appears in both ledgers with
/// identical identity fields; only one copy may survive. Synthesized rows
/// (interquarter snapshots, recurring-payment streams) are exempt. Running
/// this over an already-deduplicated set removes nothing.
pub fn dedup_entries(entries: Vec<LedgerEntry>) -> Vec<LedgerEntry> {
    let mut seen: HashSet<(String, String, String, Option<OrderedFloat<f64>>)> = HashSet::new();
    entries
        .into_iter()
        .filter(|e| {
            if e.hash == INTERQUARTER_HASH || e.hash == STREAM_HASH {
                return true;
            }
            seen.insert((
                e.hash.clone(),
                e.from.clone(),
                e.to.clone(),
                e.value.map(OrderedFloat),
            ))
        })
        .collect()
}

/// One terminal checkpoint per (quarter, wallet) that has snapshot rows,
/// anchored to the last snapshot's date. The root wallet's checkpoint
/// carries value 1 so it stays visible downstream; all others carry 0.
fn placeholder_rows(rows: &[ConsolidatedRow], wallets: &[&str]) -> Vec<ConsolidatedRow> {
    let mut quarters: Vec<&str> = Vec::new();
    for row in rows {
        if !quarters.iter().any(|q| *q == row.quarter) {
            quarters.push(row.quarter.as_str());
        }
    }

    let mut out = Vec::new();
    for quarter in &quarters {
        for wallet in wallets {
            let anchor = rows.iter().rev().find(|r| {
                r.hash == INTERQUARTER_HASH
                    && r.from_category == *wallet
                    && r.to_category == *wallet
                    && r.quarter == *quarter
            });
            let Some(anchor) = anchor else { continue };

            let marker_value = if *wallet == ROOT_WALLET { 1.0 } else { 0.0 };
            out.push(ConsolidatedRow {
                hash: INTERQUARTER_HASH.to_string(),
                date: anchor.date,
                from: PLACEHOLDER.to_string(),
                from_name: wallet.to_string(),
                from_category: PLACEHOLDER.to_string(),
                to: PLACEHOLDER.to_string(),
                to_name: PLACEHOLDER.to_string(),
                to_category: PLACEHOLDER.to_string(),
                value: Some(marker_value),
                usd: Some(marker_value),
                symbol: PLACEHOLDER.to_string(),
                acquainted: PLACEHOLDER.to_string(),
                quarter: anchor.quarter.clone(),
            });
        }
    }
    out
}

/// Repurpose sorted placeholders as labeled wallet-identity markers: the
/// hash takes the wallet label, the from-name takes the sentinel.
fn rewrite_placeholders(rows: &mut [ConsolidatedRow]) {
    for row in rows {
        if row.hash == INTERQUARTER_HASH && row.to_name == PLACEHOLDER {
            row.hash = mem::take(&mut row.from_name);
            row.from_name = row.from.clone();
        }
    }
}
