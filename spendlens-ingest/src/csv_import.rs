//! CSV statement importer.
//!
//! Header-driven: `date,description,amount,balance` in any column order.
//! Rows that fail to parse are skipped, same best-effort policy as the text
//! dialects; a missing column or undecodable file is a hard error.

use chrono::NaiveDate;

use spendlens_core::{ParseError, TransactionRecord};

pub fn parse_csv_statement(bytes: &[u8]) -> Result<Vec<TransactionRecord>, ParseError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ParseError::InvalidCsv(format!("not UTF-8: {e}")))?;

    let mut rdr = csv::Reader::from_reader(text.as_bytes());
    let headers = rdr
        .headers()
        .map_err(|e| ParseError::InvalidCsv(e.to_string()))?
        .clone();

    let col = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseError::InvalidCsv(format!("missing column: {name}")))
    };
    let date_col = col("date")?;
    let desc_col = col("description")?;
    let amount_col = col("amount")?;
    let balance_col = col("balance")?;

    let mut out = Vec::new();
    for result in rdr.records() {
        let Ok(row) = result else {
            continue;
        };
        let Some(Ok(date)) = row
            .get(date_col)
            .map(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d"))
        else {
            continue;
        };
        let Some(Ok(amount)) = row.get(amount_col).map(|s| s.trim().parse::<f64>()) else {
            continue;
        };
        let Some(Ok(balance)) = row.get(balance_col).map(|s| s.trim().parse::<f64>()) else {
            continue;
        };

        out.push(TransactionRecord {
            date,
            description: row.get(desc_col).unwrap_or("").trim().to_string(),
            amount,
            balance,
            category: None,
        });
    }

    Ok(out)
}
