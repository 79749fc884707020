//! Internal ETH transfer export normalization.
//!
//! Internal exports report inbound and outbound amounts in separate columns
//! and carry a historical ETH price per row; the signed value and USD
//! equivalent are derived here.

use std::io::Read;

use treasury_core::{Asset, Result, Transfer};

use crate::cells::{parse_date, parse_numeric, require_column};

/// Parse an internal-transfer export into canonical transfers.
///
/// Failed-status rows are discarded. The symbol is always ETH.
pub fn parse_internal<R: Read>(reader: R, file_label: &str) -> Result<Vec<Transfer>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let hash_col = require_column(&headers, file_label, "Transaction Hash")?;
    let date_col = require_column(&headers, file_label, "DateTime (UTC)")?;
    let from_col = require_column(&headers, file_label, "From")?;
    let to_col = require_column(&headers, file_label, "TxTo")?;
    let in_col = require_column(&headers, file_label, "Value_IN(ETH)")?;
    let out_col = require_column(&headers, file_label, "Value_OUT(ETH)")?;
    let price_col = require_column(&headers, file_label, "Historical $Price/Eth")?;
    let status_col = require_column(&headers, file_label, "Status")?;

    let mut transfers = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if parse_numeric(record.get(status_col).unwrap_or("")) == Some(1.0) {
            continue;
        }

        let date = parse_date(record.get(date_col).unwrap_or(""))?;
        let value_in = parse_numeric(record.get(in_col).unwrap_or(""));
        let value_out = parse_numeric(record.get(out_col).unwrap_or(""));
        let price = parse_numeric(record.get(price_col).unwrap_or(""));

        let value = signed_value(value_in, value_out);
        let usd = value.zip(price).map(|(v, p)| v * p);

        transfers.push(Transfer {
            hash: record.get(hash_col).unwrap_or("").to_string(),
            date,
            from: record.get(from_col).unwrap_or("").to_string(),
            to: record.get(to_col).unwrap_or("").to_string(),
            value,
            usd,
            symbol: Asset::Eth,
            original_weth: false,
        });
    }

    Ok(transfers)
}

/// Signed ETH movement from the export's separate inbound/outbound columns.
///
/// A row with both columns nonzero is malformed upstream; the larger of
/// inbound and negated outbound wins.
pub fn signed_value(value_in: Option<f64>, value_out: Option<f64>) -> Option<f64> {
    let value_in = value_in?;
    let value_out = value_out?;
    if value_out == 0.0 {
        Some(value_in)
    } else if value_in == 0.0 {
        Some(-value_out)
    } else {
        Some(value_in.max(-value_out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const HEADER: &str = "Transaction Hash,Blockno,UnixTimestamp,DateTime (UTC),ParentTxFrom,ParentTxTo,ParentTxETH_Value,From,TxTo,ContractAddress,Value_IN(ETH),Value_OUT(ETH),CurrentValue @ $1800/Eth,Historical $Price/Eth,Status,ErrCode,Type,PrivateNote";

    fn parse(rows: &str) -> Vec<Transfer> {
        let csv = format!("{HEADER}\n{rows}");
        parse_internal(csv.as_bytes(), "internal.csv").unwrap()
    }

    #[test]
    fn inbound_and_outbound_signs() {
        let rows = "\
0xa,1,1,2023-02-01 00:00:00,,,,0x1,0x2,,5,0,9000,1700,0,,,
0xb,1,1,2023-02-02 00:00:00,,,,0x2,0x1,,0,3,5400,1800,0,,,";
        let transfers = parse(rows);
        assert_relative_eq!(transfers[0].value.unwrap(), 5.0);
        assert_relative_eq!(transfers[0].usd.unwrap(), 8500.0);
        assert_relative_eq!(transfers[1].value.unwrap(), -3.0);
        assert_relative_eq!(transfers[1].usd.unwrap(), -5400.0);
        assert_eq!(transfers[0].symbol, Asset::Eth);
    }

    #[test]
    fn failed_rows_are_dropped() {
        let rows = "\
0xa,1,1,2023-02-01 00:00:00,,,,0x1,0x2,,5,0,9000,1700,1,,,
0xb,1,1,2023-02-02 00:00:00,,,,0x2,0x1,,0,3,5400,1800,0,,,";
        let transfers = parse(rows);
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].hash, "0xb");
    }

    // Exports occasionally emit rows with both columns populated; the
    // tie-break keeps the larger of inbound and negated outbound. Preserved
    // as-is from the upstream convention even though it looks like malformed
    // source handling rather than business logic.
    #[test]
    fn dual_sided_row_keeps_larger_magnitude() {
        assert_eq!(signed_value(Some(2.0), Some(1.0)), Some(2.0));
        assert_eq!(signed_value(Some(0.5), Some(3.0)), Some(0.5));
        assert_eq!(signed_value(Some(0.0), Some(3.0)), Some(-3.0));
        assert_eq!(signed_value(Some(4.0), Some(0.0)), Some(4.0));
        assert_eq!(signed_value(None, Some(1.0)), None);
    }

    #[test]
    fn varying_current_value_column_is_ignored() {
        // The CurrentValue header embeds a spot price and changes between
        // exports; parsing must not depend on it.
        let header = HEADER.replace("$1800/Eth", "$2450.17/Eth");
        let csv = format!(
            "{header}\n0xa,1,1,2023-02-01 00:00:00,,,,0x1,0x2,,5,0,12250,1700,0,,,"
        );
        let transfers = parse_internal(csv.as_bytes(), "internal.csv").unwrap();
        assert_eq!(transfers.len(), 1);
    }
}
