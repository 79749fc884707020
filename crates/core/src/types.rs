//! Core record types for the treasury ledger pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Hash marker on synthesized quarter-boundary balance rows.
pub const INTERQUARTER_HASH: &str = "Interquarter";
/// Hash marker on synthesized recurring-payment rows produced upstream.
pub const STREAM_HASH: &str = "Stream";
/// Sentinel used by placeholder checkpoint rows in the consolidated ledger.
pub const PLACEHOLDER: &str = "Plchld";
/// Suffix on quarter labels of carried-balance rows.
pub const UNSPENT_SUFFIX: &str = " Unspent";

/// Bridge/wrap contract category excluded from aggregation and consolidation.
pub const WETH_CONTRACT: &str = "WETH Contract";
/// Working group dissolved after one quarter; its carried balances target the successor.
pub const DISSOLVED_GROUP: &str = "Community WG";
pub const DISSOLVED_GROUP_SUCCESSOR: &str = "Community SG";
pub const ENDOWMENT: &str = "Endowment";
pub const ENDOWMENT_FEES: &str = "Endowment Fees";
/// The wallet whose placeholder checkpoints carry value 1 instead of 0.
pub const ROOT_WALLET: &str = "DAO Wallet";

/// Top-level entities in presentation priority order.
pub const TOP_LEVEL_ENTITIES: [&str; 8] = [
    "ENS Multisig",
    "Root Multisig",
    "DAO Wallet",
    "Ecosystem",
    "Public Goods",
    "Metagov",
    "Community WG",
    "Service Providers",
];

/// Working groups funded directly from the DAO wallet, in priority order.
pub const DAO_FUNDED_GROUPS: [&str; 5] = [
    "Ecosystem",
    "Public Goods",
    "Metagov",
    "Community WG",
    "Service Providers",
];

/// Counterparties whose outbound rows are dropped from the consolidated ledger.
pub const CONSOLIDATION_DENYLIST: [&str; 5] = [
    "Token Timelock",
    "slobo.eth",
    "capitulation.eth",
    "Disperse.app",
    "ETHGlobal",
];

/// Asset tracked by the treasury ledgers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Asset {
    /// Stable reporting-currency token.
    Usdc,
    /// Primary asset; WETH transfers are remapped here.
    Eth,
    /// Secondary governance token.
    Ens,
}

impl Asset {
    /// Get the display symbol.
    pub fn as_str(self) -> &'static str {
        match self {
            Asset::Usdc => "USDC",
            Asset::Eth => "ETH",
            Asset::Ens => "ENS",
        }
    }

    /// Map a raw export symbol onto the tracked asset set.
    ///
    /// Returns `(asset, original_weth)`; symbols outside the allow-list
    /// return `None` and their rows are discarded at ingestion.
    pub fn from_symbol(symbol: &str) -> Option<(Asset, bool)> {
        match symbol {
            "USDC" => Some((Asset::Usdc, false)),
            "ENS" => Some((Asset::Ens, false)),
            "WETH" => Some((Asset::Eth, true)),
            _ => None,
        }
    }
}

impl std::str::FromStr for Asset {
    type Err = crate::error::Error;

    /// Parse a display symbol, as written to ledger files.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USDC" => Ok(Asset::Usdc),
            "ETH" => Ok(Asset::Eth),
            "ENS" => Ok(Asset::Ens),
            other => Err(crate::error::Error::data(format!("unknown symbol {other:?}"))),
        }
    }
}

/// A normalized transfer in the canonical schema, before counterparty
/// classification.
///
/// `value`/`usd` are `None` when the source cell was unparsable; missing
/// values propagate through the pipeline and are excluded from sums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub hash: String,
    pub date: NaiveDate,
    pub from: String,
    pub to: String,
    pub value: Option<f64>,
    pub usd: Option<f64>,
    pub symbol: Asset,
    /// True when the row arrived as WETH and was remapped to ETH. The later
    /// sign-assignment rule depends on this.
    pub original_weth: bool,
}

/// A classified row of one wallet's ledger.
///
/// Sign convention: positive = inbound to the wallet whose ledger this row
/// belongs to, negative = outbound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
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
    pub symbol: Asset,
    pub original_weth: bool,
    pub acquainted: bool,
}

impl LedgerEntry {
    /// Whether either side of the transfer classified into the category.
    pub fn touches_category(&self, category: &str) -> bool {
        self.from_category == category || self.to_category == category
    }

    /// Whether either display name matches.
    pub fn touches_name(&self, name: &str) -> bool {
        self.from_name == name || self.to_name == name
    }
}

/// One aggregated (quarter, counterparty pair, asset) bucket.
///
/// `from`/`to` hold categories; sums exclude missing source values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterRow {
    pub quarter: String,
    pub from: String,
    pub to: String,
    pub symbol: Asset,
    pub value: f64,
    pub usd: f64,
}

impl QuarterRow {
    /// Whether this is a carried-balance row rather than an aggregated bucket.
    pub fn is_unspent(&self) -> bool {
        self.quarter.ends_with(UNSPENT_SUFFIX)
    }
}
