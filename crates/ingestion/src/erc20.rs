//! ERC-20 transfer export normalization.
//!
//! Reads one wallet's token export and emits canonical transfers. Only
//! allow-listed symbols survive; WETH rows remap to ETH while remembering
//! their origin, which the later sign-assignment rule depends on.

use std::io::Read;

use treasury_core::{Asset, PriceTable, Result, Transfer};

use crate::cells::{parse_date, parse_numeric, require_column};

/// Parse an ERC-20 transfer export into canonical transfers.
///
/// The export usually carries a contemporaneous USD value per row; when it is
/// absent (multisends are the common case) the value is reconstructed from
/// the price table: stable-token rows use their own value, ETH/ENS rows use
/// the exact-date price, and a date missing from the table prices at zero.
pub fn parse_erc20<R: Read>(
    reader: R,
    file_label: &str,
    prices: &PriceTable,
) -> Result<Vec<Transfer>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let hash_col = require_column(&headers, file_label, "Transaction Hash")?;
    let date_col = require_column(&headers, file_label, "DateTime (UTC)")?;
    let from_col = require_column(&headers, file_label, "From")?;
    let to_col = require_column(&headers, file_label, "To")?;
    let value_col = require_column(&headers, file_label, "TokenValue")?;
    let usd_col = require_column(&headers, file_label, "USDValueDayOfTx")?;
    let symbol_col = require_column(&headers, file_label, "TokenSymbol")?;

    let mut transfers = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let raw_symbol = record.get(symbol_col).unwrap_or("").trim();
        let Some((symbol, original_weth)) = Asset::from_symbol(raw_symbol) else {
            continue;
        };

        let date = parse_date(record.get(date_col).unwrap_or(""))?;
        let value = parse_numeric(record.get(value_col).unwrap_or(""));
        let mut usd = parse_numeric(record.get(usd_col).unwrap_or(""));

        if usd.is_none() {
            usd = match (symbol, value) {
                (Asset::Usdc, Some(v)) => Some(v),
                (Asset::Eth | Asset::Ens, Some(v)) => Some(v * prices.price_of(symbol, date)),
                (_, None) => None,
            };
        }

        transfers.push(Transfer {
            hash: record.get(hash_col).unwrap_or("").to_string(),
            date,
            from: record.get(from_col).unwrap_or("").to_string(),
            to: record.get(to_col).unwrap_or("").to_string(),
            value,
            usd,
            symbol,
            original_weth,
        });
    }

    Ok(transfers)
}
