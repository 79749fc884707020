//! Directory orchestration for the batch pipeline.
//!
//! One `$<Wallet Name>` folder of raw exports per wallet; each wallet is
//! processed in isolation, so a malformed or missing export aborts only that
//! wallet's outputs. Consolidation runs afterwards over whatever ledgers
//! made it to disk.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use treasury_consolidate::consolidate;
use treasury_core::{
    Error, HashOverrides, LedgerEntry, PipelineConfig, PriceTable, Result, WalletRegistry,
};
use treasury_ingestion::{merge_transfers, parse_erc20, parse_internal};
use treasury_reconcile::{classify, group_by_quarter, sort_quarterly, unspent_rows};

use crate::io;

/// ERC-20 export file name inside a wallet folder.
pub const TOKEN_FILE: &str = "token.csv";
/// Internal-transfer export file name inside a wallet folder.
pub const INTERNAL_FILE: &str = "internal.csv";

/// Loaded reference registries, passed explicitly into each stage.
pub struct Registries {
    pub wallets: WalletRegistry,
    pub overrides: HashOverrides,
    pub prices: PriceTable,
}

/// Outcome of one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub wallets_processed: usize,
    pub wallets_failed: usize,
    pub consolidated_rows: usize,
}

/// Load the three reference registries relative to the run root.
pub fn load_registries(root: &Path, config: &PipelineConfig) -> Result<Registries> {
    Ok(Registries {
        wallets: io::load_wallets(&root.join(&config.registry.wallets_file))?,
        overrides: io::load_overrides(&root.join(&config.registry.overrides_file))?,
        prices: io::load_prices(&root.join(&config.registry.prices_file))?,
    })
}

/// Wallet folders under the raw directory, `(wallet name, folder path)`,
/// sorted by name so runs are deterministic.
pub fn discover_wallets(raw_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut wallets = Vec::new();
    for dir_entry in std::fs::read_dir(raw_dir)? {
        let dir_entry = dir_entry?;
        if !dir_entry.file_type()?.is_dir() {
            continue;
        }
        let folder_name = dir_entry.file_name().to_string_lossy().to_string();
        let Some(wallet) = folder_name.strip_prefix('$') else {
            continue;
        };
        wallets.push((wallet.to_string(), dir_entry.path()));
    }
    wallets.sort();
    Ok(wallets)
}

/// Run one wallet through normalization, classification, aggregation, and
/// carryforward, writing its ledger and quarterly summary.
pub fn process_wallet(
    wallet: &str,
    folder: &Path,
    root: &Path,
    config: &PipelineConfig,
    registries: &Registries,
) -> Result<()> {
    let token_path = folder.join(TOKEN_FILE);
    let internal_path = folder.join(INTERNAL_FILE);

    let erc20 = parse_erc20(
        File::open(&token_path)?,
        &token_path.display().to_string(),
        &registries.prices,
    )?;
    let internal = parse_internal(
        File::open(&internal_path)?,
        &internal_path.display().to_string(),
    )?;

    let merged = merge_transfers(erc20, internal);
    let entries = classify(merged, wallet, &registries.wallets, &registries.overrides);

    let ledger_path = root
        .join(&config.dirs.local_ledgers_dir)
        .join(format!("{wallet}.csv"));
    io::write_ledger(&ledger_path, &entries)?;

    let mut rows = group_by_quarter(&entries);
    let unspent = unspent_rows(&rows, &registries.prices, wallet);
    rows.extend(unspent);
    let sorted = sort_quarterly(rows, wallet);

    let quarterly_path = root
        .join(&config.dirs.quarterly_dir)
        .join(format!("{wallet}_q.csv"));
    io::write_quarterly(&quarterly_path, &sorted)?;

    Ok(())
}

/// Read the per-wallet ledgers back from disk for consolidation.
///
/// Files that do not parse as the ledger schema (e.g. summaries produced by
/// other tooling) are skipped with a warning.
pub fn collect_ledgers(ledgers_dir: &Path) -> Result<Vec<(String, Vec<LedgerEntry>)>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(ledgers_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    paths.sort();

    let mut ledgers = Vec::new();
    for path in paths {
        let wallet = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .ok_or_else(|| Error::data(format!("unnameable ledger file {}", path.display())))?;
        match io::read_ledger(&path) {
            Ok(entries) => ledgers.push((wallet, entries)),
            Err(err) => warn!(file = %path.display(), %err, "skipping unreadable ledger"),
        }
    }
    Ok(ledgers)
}

/// Run the full batch: every wallet, then consolidation.
pub fn run(root: &Path, config: &PipelineConfig) -> Result<RunSummary> {
    let registries = load_registries(root, config)?;

    std::fs::create_dir_all(root.join(&config.dirs.local_ledgers_dir))?;
    std::fs::create_dir_all(root.join(&config.dirs.quarterly_dir))?;

    let mut processed = 0;
    let mut failed = 0;
    for (wallet, folder) in discover_wallets(&root.join(&config.dirs.raw_dir))? {
        match process_wallet(&wallet, &folder, root, config, &registries) {
            Ok(()) => {
                info!(%wallet, "reconciled");
                processed += 1;
            }
            Err(err) => {
                error!(%wallet, %err, "wallet failed; continuing with the rest");
                failed += 1;
            }
        }
    }

    let ledgers = collect_ledgers(&root.join(&config.dirs.local_ledgers_dir))?;
    let consolidated = consolidate(&ledgers, &registries.wallets);
    io::write_consolidated(&root.join(&config.dirs.consolidated_file), &consolidated)?;
    info!(rows = consolidated.len(), "consolidated ledger written");

    Ok(RunSummary {
        wallets_processed: processed,
        wallets_failed: failed,
        consolidated_rows: consolidated.len(),
    })
}
