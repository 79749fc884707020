//! Entity-priority total ordering for the consolidated ledger.

use chrono::NaiveDate;
use ordered_float::OrderedFloat;

use treasury_core::{DAO_FUNDED_GROUPS, INTERQUARTER_HASH, PLACEHOLDER, TOP_LEVEL_ENTITIES};

use crate::row::ConsolidatedRow;

/// Fixed presentation priority of a row; lower sorts earlier.
///
/// Each top-level entity owns a block of three slots: its interquarter
/// checkpoints, its inflows, its outflows. DAO Wallet outflows to the
/// working groups it funds jump to the recipient's inflow slot instead, and
/// placeholder checkpoints sit between DAO Wallet's checkpoint and inflow
/// slots. Rows touching none of the named entities sort last.
pub fn priority(row: &ConsolidatedRow) -> f64 {
    if row.hash == INTERQUARTER_HASH {
        if row.to_name == PLACEHOLDER {
            return 7.5;
        }
        for (i, entity) in TOP_LEVEL_ENTITIES.iter().enumerate() {
            if row.from_name == *entity || row.to_name == *entity {
                return (1 + i * 3) as f64;
            }
        }
        return 25.0;
    }

    if row.to_name == "ENS Multisig" {
        2.0
    } else if row.from_name == "ENS Multisig" {
        3.0
    } else if row.to_name == "Root Multisig" {
        5.0
    } else if row.from_name == "Root Multisig" {
        6.0
    } else if row.to_name == "DAO Wallet" {
        8.0
    } else if row.from_name == "DAO Wallet" {
        match DAO_FUNDED_GROUPS.iter().position(|g| row.to_name == *g) {
            Some(i) => (11 + i * 3) as f64,
            None => 9.0,
        }
    } else if row.from_name == "Ecosystem" {
        12.0
    } else if row.from_name == "Public Goods" {
        15.0
    } else if row.from_name == "Metagov" {
        18.0
    } else if row.from_name == "Community WG" {
        21.0
    } else if row.from_name == "Service Providers" {
        24.0
    } else {
        25.0
    }
}

/// Total ordering key: quarter, entity priority, USD magnitude (largest
/// first), date. Rows without a USD value sort last within their slot.
pub fn sort_key(row: &ConsolidatedRow) -> (String, OrderedFloat<f64>, OrderedFloat<f64>, NaiveDate) {
    let usd_key = row.usd.map(|u| -u).unwrap_or(f64::INFINITY);
    (
        row.quarter.clone(),
        OrderedFloat(priority(row)),
        OrderedFloat(usd_key),
        row.date,
    )
}
