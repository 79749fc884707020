//! Consolidated ledger row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use treasury_core::{quarter_label, LedgerEntry};

/// A row of the consolidated cross-entity ledger.
///
/// The schema is the per-wallet ledger schema plus the quarter label.
/// Symbol and acquaintance are plain strings here so sentinel placeholder
/// rows fit the same shape as real transfers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedRow {
    pub hash: String,
    pub date: NaiveDate,
    pub from: String,
    pub from_name: String,
    pub from_category: String,
    pub to: String,
    pub to_name: String,
    pub to_category: String,
    pub value: Option<f64>,
    pub usd: Option<f64>,
    pub symbol: String,
    pub acquainted: String,
    pub quarter: String,
}

impl From<LedgerEntry> for ConsolidatedRow {
    fn from(e: LedgerEntry) -> Self {
        ConsolidatedRow {
            quarter: quarter_label(e.date),
            hash: e.hash,
            date: e.date,
            from: e.from,
            from_name: e.from_name,
            from_category: e.from_category,
            to: e.to,
            to_name: e.to_name,
            to_category: e.to_category,
            value: e.value,
            usd: e.usd,
            symbol: e.symbol.as_str().to_string(),
            acquainted: if e.acquainted { "1" } else { "0" }.to_string(),
        }
    }
}
