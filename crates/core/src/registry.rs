//! Reference registries: wallet entities, hash overrides, and asset prices.
//!
//! All three are static read-only lookup tables produced outside the
//! pipeline. They are passed explicitly into each stage rather than held as
//! globals.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::Asset;

/// A named treasury wallet or known counterparty address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletEntity {
    pub address: String,
    /// Entity kind, e.g. `Treasury Consolidator`, `Payment Account`, `Swap`.
    pub kind: String,
    /// Category groups addresses under one organizational unit.
    pub category: String,
    /// Display name; defaults to the category when absent.
    #[serde(default)]
    pub name: Option<String>,
}

impl WalletEntity {
    /// Display name for the entity.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.category)
    }
}

/// Address → (category, display name) lookup over the wallet registry.
#[derive(Debug, Clone, Default)]
pub struct WalletRegistry {
    entities: Vec<WalletEntity>,
    by_address: HashMap<String, usize>,
}

impl WalletRegistry {
    /// Build the registry; later entries win on duplicate addresses.
    pub fn new(entities: Vec<WalletEntity>) -> Self {
        let by_address = entities
            .iter()
            .enumerate()
            .map(|(i, e)| (e.address.clone(), i))
            .collect();
        Self { entities, by_address }
    }

    /// Resolve an address to `(category, display name)`.
    ///
    /// Unresolved addresses classify to themselves.
    pub fn resolve(&self, address: &str) -> (String, String) {
        match self.by_address.get(address) {
            Some(&i) => {
                let entity = &self.entities[i];
                (entity.category.clone(), entity.display_name().to_string())
            }
            None => (address.to_string(), address.to_string()),
        }
    }

    /// All registered categories.
    pub fn categories(&self) -> HashSet<&str> {
        self.entities.iter().map(|e| e.category.as_str()).collect()
    }

    /// Categories of swap-router entities, denylisted during consolidation.
    pub fn swap_names(&self) -> HashSet<&str> {
        self.entities
            .iter()
            .filter(|e| e.kind == "Swap")
            .map(|e| e.category.as_str())
            .collect()
    }

    pub fn entities(&self) -> &[WalletEntity] {
        &self.entities
    }
}

/// One hand-curated hash → counterparty correction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashOverrideEntry {
    pub hash: String,
    pub counterparty: String,
}

/// Transaction hashes whose registry classification is known to be wrong.
#[derive(Debug, Clone, Default)]
pub struct HashOverrides {
    map: HashMap<String, String>,
}

impl HashOverrides {
    pub fn new(entries: Vec<HashOverrideEntry>) -> Self {
        let map = entries
            .into_iter()
            .map(|e| (e.hash, e.counterparty))
            .collect();
        Self { map }
    }

    /// Authoritative counterparty name for a hash, if curated.
    pub fn get(&self, hash: &str) -> Option<&str> {
        self.map.get(hash).map(String::as_str)
    }

    /// Counterparty names contributed by the override table; these count as
    /// known when deciding acquaintance.
    pub fn counterparties(&self) -> impl Iterator<Item = &str> {
        self.map.values().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Closing prices for one calendar day in the reporting currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub ens: f64,
    pub eth: f64,
}

impl PricePoint {
    /// Price of an asset in the reporting currency; the stable token is 1.
    pub fn of(&self, asset: Asset) -> f64 {
        match asset {
            Asset::Usdc => 1.0,
            Asset::Eth => self.eth,
            Asset::Ens => self.ens,
        }
    }
}

/// One row of the external price table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceEntry {
    pub date: NaiveDate,
    pub ens: f64,
    pub eth: f64,
}

/// Calendar date → price pair lookup.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    prices: BTreeMap<NaiveDate, PricePoint>,
}

impl PriceTable {
    pub fn new(entries: Vec<PriceEntry>) -> Self {
        let prices = entries
            .into_iter()
            .map(|e| (e.date, PricePoint { ens: e.ens, eth: e.eth }))
            .collect();
        Self { prices }
    }

    pub fn insert(&mut self, date: NaiveDate, point: PricePoint) {
        self.prices.insert(date, point);
    }

    /// Exact-date lookup.
    pub fn on(&self, date: NaiveDate) -> Option<PricePoint> {
        self.prices.get(&date).copied()
    }

    /// Price of an asset on the exact date; a missing date prices at zero
    /// rather than failing the row.
    pub fn price_of(&self, asset: Asset, date: NaiveDate) -> f64 {
        self.on(date).map(|p| p.of(asset)).unwrap_or(0.0)
    }

    /// Latest entry dated at or before `date`, falling back to the earliest
    /// available entry when none precedes it.
    pub fn at_or_before(&self, date: NaiveDate) -> Option<(NaiveDate, PricePoint)> {
        self.prices
            .range(..=date)
            .next_back()
            .or_else(|| self.prices.iter().next())
            .map(|(d, p)| (*d, *p))
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn registry() -> WalletRegistry {
        WalletRegistry::new(vec![
            WalletEntity {
                address: "0xdao".to_string(),
                kind: "Treasury Consolidator".to_string(),
                category: "DAO Wallet".to_string(),
                name: None,
            },
            WalletEntity {
                address: "0xeco".to_string(),
                kind: "Payment Account".to_string(),
                category: "Ecosystem".to_string(),
                name: Some("Ecosystem Safe".to_string()),
            },
            WalletEntity {
                address: "0xswap".to_string(),
                kind: "Swap".to_string(),
                category: "CoW Swap".to_string(),
                name: None,
            },
        ])
    }

    #[test]
    fn resolves_known_and_unknown_addresses() {
        let reg = registry();
        assert_eq!(
            reg.resolve("0xdao"),
            ("DAO Wallet".to_string(), "DAO Wallet".to_string())
        );
        assert_eq!(
            reg.resolve("0xeco"),
            ("Ecosystem".to_string(), "Ecosystem Safe".to_string())
        );
        assert_eq!(
            reg.resolve("0xother"),
            ("0xother".to_string(), "0xother".to_string())
        );
    }

    #[test]
    fn swap_names_filter_by_kind() {
        let reg = registry();
        let swaps = reg.swap_names();
        assert!(swaps.contains("CoW Swap"));
        assert_eq!(swaps.len(), 1);
    }

    #[test]
    fn price_lookup_fallbacks() {
        let table = PriceTable::new(vec![
            PriceEntry { date: date(2023, 3, 1), ens: 12.0, eth: 1600.0 },
            PriceEntry { date: date(2023, 3, 20), ens: 14.0, eth: 1700.0 },
        ]);

        assert_eq!(table.price_of(Asset::Eth, date(2023, 3, 1)), 1600.0);
        // Missing exact date prices at zero.
        assert_eq!(table.price_of(Asset::Ens, date(2023, 3, 2)), 0.0);

        // Latest at-or-before, then earliest as last resort.
        let (d, p) = table.at_or_before(date(2023, 3, 31)).unwrap();
        assert_eq!(d, date(2023, 3, 20));
        assert_eq!(p.ens, 14.0);
        let (d, _) = table.at_or_before(date(2023, 1, 1)).unwrap();
        assert_eq!(d, date(2023, 3, 1));

        assert!(PriceTable::default().at_or_before(date(2023, 1, 1)).is_none());
    }
}
