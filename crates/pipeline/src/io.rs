//! Registry and ledger file I/O.
//!
//! Registries arrive as JSON; ledgers and summaries are CSV. Reads resolve
//! columns by header name so files survive column reordering, and writes pin
//! the column order the downstream visualization expects.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use treasury_consolidate::ConsolidatedRow;
use treasury_core::{
    Error, HashOverrideEntry, HashOverrides, LedgerEntry, PriceEntry, PriceTable, QuarterRow,
    Result, WalletEntity, WalletRegistry,
};

/// Column order of per-wallet ledger files.
pub const LEDGER_COLUMNS: [&str; 12] = [
    "hash",
    "date",
    "from",
    "from_name",
    "from_category",
    "to",
    "to_name",
    "to_category",
    "value",
    "usd_value",
    "symbol",
    "acquainted",
];

/// Column order of per-wallet quarterly summary files.
pub const QUARTERLY_COLUMNS: [&str; 6] = ["quarter", "from", "to", "value", "usd_value", "symbol"];

pub fn load_wallets(path: &Path) -> Result<WalletRegistry> {
    let file = File::open(path)?;
    let entities: Vec<WalletEntity> = serde_json::from_reader(BufReader::new(file))?;
    Ok(WalletRegistry::new(entities))
}

pub fn load_overrides(path: &Path) -> Result<HashOverrides> {
    let file = File::open(path)?;
    let entries: Vec<HashOverrideEntry> = serde_json::from_reader(BufReader::new(file))?;
    Ok(HashOverrides::new(entries))
}

pub fn load_prices(path: &Path) -> Result<PriceTable> {
    let file = File::open(path)?;
    let entries: Vec<PriceEntry> = serde_json::from_reader(BufReader::new(file))?;
    Ok(PriceTable::new(entries))
}

/// Write one wallet's reconciled ledger.
pub fn write_ledger(path: &Path, entries: &[LedgerEntry]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(LEDGER_COLUMNS)?;
    for e in entries {
        let date = e.date.to_string();
        let value = format_opt(e.value);
        let usd = format_opt(e.usd);
        wtr.write_record([
            e.hash.as_str(),
            date.as_str(),
            e.from.as_str(),
            e.from_name.as_str(),
            e.from_category.as_str(),
            e.to.as_str(),
            e.to_name.as_str(),
            e.to_category.as_str(),
            value.as_str(),
            usd.as_str(),
            e.symbol.as_str(),
            if e.acquainted { "1" } else { "0" },
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read a reconciled ledger back, as the consolidation step does.
///
/// The WETH-origin flag is not persisted; it only matters before sign
/// assignment, which happened upstream of the write.
pub fn read_ledger(path: &Path) -> Result<Vec<LedgerEntry>> {
    let label = path.display().to_string();
    let mut rdr = csv::Reader::from_path(path)?;
    let headers = rdr.headers()?.clone();

    let column = |name: &'static str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::missing_column(label.clone(), name))
    };
    let hash_col = column("hash")?;
    let date_col = column("date")?;
    let from_col = column("from")?;
    let from_name_col = column("from_name")?;
    let from_category_col = column("from_category")?;
    let to_col = column("to")?;
    let to_name_col = column("to_name")?;
    let to_category_col = column("to_category")?;
    let value_col = column("value")?;
    let usd_col = column("usd_value")?;
    let symbol_col = column("symbol")?;
    let acquainted_col = column("acquainted")?;

    let mut entries = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let get = |i: usize| record.get(i).unwrap_or("");

        let date = chrono::NaiveDate::parse_from_str(get(date_col), "%Y-%m-%d")
            .map_err(|_| Error::InvalidDate(get(date_col).to_string()))?;
        entries.push(LedgerEntry {
            hash: get(hash_col).to_string(),
            date,
            from: get(from_col).to_string(),
            from_name: get(from_name_col).to_string(),
            from_category: get(from_category_col).to_string(),
            to: get(to_col).to_string(),
            to_name: get(to_name_col).to_string(),
            to_category: get(to_category_col).to_string(),
            value: parse_opt(get(value_col)),
            usd: parse_opt(get(usd_col)),
            symbol: get(symbol_col).parse()?,
            original_weth: false,
            acquainted: get(acquainted_col) == "1",
        });
    }
    Ok(entries)
}

/// Write one wallet's quarterly summary.
pub fn write_quarterly(path: &Path, rows: &[QuarterRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(QUARTERLY_COLUMNS)?;
    for row in rows {
        let value = row.value.to_string();
        let usd = row.usd.to_string();
        wtr.write_record([
            row.quarter.as_str(),
            row.from.as_str(),
            row.to.as_str(),
            value.as_str(),
            usd.as_str(),
            row.symbol.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the consolidated cross-entity ledger.
pub fn write_consolidated(path: &Path, rows: &[ConsolidatedRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    let mut header: Vec<&str> = LEDGER_COLUMNS.to_vec();
    header.push("quarter");
    wtr.write_record(&header)?;
    for row in rows {
        let date = row.date.to_string();
        let value = format_opt(row.value);
        let usd = format_opt(row.usd);
        wtr.write_record([
            row.hash.as_str(),
            date.as_str(),
            row.from.as_str(),
            row.from_name.as_str(),
            row.from_category.as_str(),
            row.to.as_str(),
            row.to_name.as_str(),
            row.to_category.as_str(),
            value.as_str(),
            usd.as_str(),
            row.symbol.as_str(),
            row.acquainted.as_str(),
            row.quarter.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn format_opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn parse_opt(cell: &str) -> Option<f64> {
    if cell.is_empty() {
        None
    } else {
        cell.parse().ok()
    }
}
