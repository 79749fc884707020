//! Counterparty classification.
//!
//! Resolves raw addresses into (category, display name) pairs, applies the
//! hand-curated hash override table, recomputes acquaintance, and settles the
//! sign convention from the perspective of the wallet whose ledger is being
//! built.

use std::collections::HashSet;

use treasury_core::{Asset, HashOverrides, LedgerEntry, Transfer, WalletRegistry};

/// Classify one wallet's merged transfers into ledger entries.
///
/// `wallet_ctx` is the category whose ledger is being built; the override and
/// sign rules are relative to it, so the same transfer classifies differently
/// in the sender's and the recipient's ledger.
pub fn classify(
    transfers: Vec<Transfer>,
    wallet_ctx: &str,
    registry: &WalletRegistry,
    overrides: &HashOverrides,
) -> Vec<LedgerEntry> {
    let known: HashSet<&str> = registry
        .categories()
        .into_iter()
        .chain(overrides.counterparties())
        .collect();

    transfers
        .into_iter()
        .map(|t| classify_one(t, wallet_ctx, registry, overrides, &known))
        .collect()
}

fn classify_one(
    t: Transfer,
    wallet_ctx: &str,
    registry: &WalletRegistry,
    overrides: &HashOverrides,
    known: &HashSet<&str>,
) -> LedgerEntry {
    let (mut from_category, mut from_name) = registry.resolve(&t.from);
    let (mut to_category, mut to_name) = registry.resolve(&t.to);

    // The override names the party opposite the ledger's own wallet: the
    // recipient when this wallet sent, the sender otherwise.
    if let Some(counterparty) = overrides.get(&t.hash) {
        if from_category == wallet_ctx {
            to_category = counterparty.to_string();
        } else {
            from_category = counterparty.to_string();
        }
    }

    // Names that failed to resolve follow the (possibly overridden) category.
    if from_name == t.from {
        from_name = from_category.clone();
    }
    if to_name == t.to {
        to_name = to_category.clone();
    }

    let acquainted =
        known.contains(from_category.as_str()) && known.contains(to_category.as_str());

    let (value, usd) =
        if needs_sign_flip(&from_category, wallet_ctx, t.symbol, t.original_weth) {
            (t.value.map(|v| -v), t.usd.map(|u| -u))
        } else {
            (t.value, t.usd)
        };

    LedgerEntry {
        hash: t.hash,
        date: t.date,
        from: t.from,
        from_name,
        from_category,
        to: t.to,
        to_name,
        to_category,
        value,
        usd,
        symbol: t.symbol,
        original_weth: t.original_weth,
        acquainted,
    }
}

/// Whether the extractor-assigned sign must be negated for this ledger.
///
/// Token exports report unsigned amounts; when the ledger's own wallet is
/// the sender of a stable, secondary, or originally-WETH transfer the row is
/// an outflow. Internal ETH rows already carry their sign from the
/// inbound/outbound derivation and are left alone.
pub fn needs_sign_flip(
    from_category: &str,
    wallet_ctx: &str,
    symbol: Asset,
    original_weth: bool,
) -> bool {
    from_category == wallet_ctx
        && (matches!(symbol, Asset::Usdc | Asset::Ens) || original_weth)
}
