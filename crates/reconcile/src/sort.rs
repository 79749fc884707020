//! Quarterly presentation order.

use treasury_core::{QuarterRow, UNSPENT_SUFFIX};

/// Order each quarter's buckets for presentation.
///
/// Quarters come out in ascending label order. Within a quarter, incoming
/// buckets (counterparty → wallet) lead in descending USD order, followed by
/// outgoing buckets in ascending order, so the largest outflow comes first.
/// Carried-balance buckets pass through untouched.
pub fn sort_quarterly(rows: Vec<QuarterRow>, wallet: &str) -> Vec<QuarterRow> {
    let mut labels: Vec<String> = Vec::new();
    for row in &rows {
        if !labels.contains(&row.quarter) {
            labels.push(row.quarter.clone());
        }
    }
    labels.sort_unstable();

    let mut out = Vec::with_capacity(rows.len());
    for label in &labels {
        let quarter_rows: Vec<&QuarterRow> = rows.iter().filter(|r| &r.quarter == label).collect();
        if label.ends_with(UNSPENT_SUFFIX) {
            out.extend(quarter_rows.into_iter().cloned());
            continue;
        }

        let (mut incoming, mut outgoing): (Vec<&QuarterRow>, Vec<&QuarterRow>) =
            quarter_rows.into_iter().partition(|r| r.from != wallet);
        incoming.sort_by(|a, b| b.usd.total_cmp(&a.usd));
        outgoing.sort_by(|a, b| a.usd.total_cmp(&b.usd));
        out.extend(incoming.into_iter().cloned());
        out.extend(outgoing.into_iter().cloned());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use treasury_core::Asset;

    fn row(quarter: &str, from: &str, to: &str, usd: f64) -> QuarterRow {
        QuarterRow {
            quarter: quarter.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            symbol: Asset::Usdc,
            value: usd,
            usd,
        }
    }

    #[test]
    fn incoming_desc_then_outgoing_asc() {
        let rows = vec![
            row("2023 Q1", "Ecosystem", "0xgrant", -500.0),
            row("2023 Q1", "DAO Wallet", "Ecosystem", 100.0),
            row("2023 Q1", "Ecosystem", "0xother", -20.0),
            row("2023 Q1", "Metagov", "Ecosystem", 700.0),
        ];
        let sorted = sort_quarterly(rows, "Ecosystem");
        let usd: Vec<f64> = sorted.iter().map(|r| r.usd).collect();
        assert_eq!(usd, vec![700.0, 100.0, -500.0, -20.0]);
    }

    #[test]
    fn unspent_buckets_pass_through_unsorted() {
        let rows = vec![
            row("2023 Q1", "DAO Wallet", "Ecosystem", 100.0),
            row("2023 Q1 Unspent", "Ecosystem", "Ecosystem", 5.0),
            row("2023 Q1 Unspent", "Ecosystem", "Ecosystem", 900.0),
            row("2023 Q2", "DAO Wallet", "Ecosystem", 50.0),
        ];
        let sorted = sort_quarterly(rows, "Ecosystem");
        let quarters: Vec<&str> = sorted.iter().map(|r| r.quarter.as_str()).collect();
        assert_eq!(
            quarters,
            vec!["2023 Q1", "2023 Q1 Unspent", "2023 Q1 Unspent", "2023 Q2"]
        );
        // Original order preserved inside the unspent bucket.
        assert_eq!(sorted[1].usd, 5.0);
        assert_eq!(sorted[2].usd, 900.0);
    }
}
