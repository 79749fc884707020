//! Configuration structures for the treasury ledger pipeline.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration for one pipeline run.
///
/// All paths are resolved relative to the run's root directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory layout.
    pub dirs: DirConfig,
    /// Reference registry file locations.
    pub registry: RegistryConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dirs: DirConfig::default(),
            registry: RegistryConfig::default(),
        }
    }
}

/// Input and output directory layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirConfig {
    /// Raw export folders, one `$<Wallet Name>` folder per wallet.
    pub raw_dir: PathBuf,
    /// Per-wallet reconciled ledgers.
    pub local_ledgers_dir: PathBuf,
    /// Per-wallet quarterly summaries.
    pub quarterly_dir: PathBuf,
    /// Consolidated cross-entity ledger.
    pub consolidated_file: PathBuf,
}

impl Default for DirConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("raw_txs"),
            local_ledgers_dir: PathBuf::from("local_ledgers"),
            quarterly_dir: PathBuf::from("quarterly_ledgers"),
            consolidated_file: PathBuf::from("d_ledgers.csv"),
        }
    }
}

/// Reference registry file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub wallets_file: PathBuf,
    pub overrides_file: PathBuf,
    pub prices_file: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            wallets_file: PathBuf::from("registry/wallets.json"),
            overrides_file: PathBuf::from("registry/overrides.json"),
            prices_file: PathBuf::from("registry/prices.json"),
        }
    }
}
