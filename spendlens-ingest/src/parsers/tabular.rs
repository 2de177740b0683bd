//! Tabular statement parser (one transaction per line).
//!
//! Expected extracted-text section:
//!   Transaction Date   Description                    Amount    Balance
//!   15 Jan 2024        Grocery Store                  -45.00    1000.00
//!   28 Jan 2024        PAYROLL ACME                  +2100.00   3100.00

use chrono::NaiveDate;
use regex::Regex;

use spendlens_core::{ParseError, TransactionRecord};

/// Rows only count once this header marker has been seen.
const HEADER_SENTINEL: &str = "Transaction Date";

/// Parse trimmed statement lines into transactions.
///
/// The amount must carry exactly two decimal digits; anything else fails the
/// row grammar and is skipped. A date that matches the pattern but is not a
/// real calendar date drops that single row.
pub fn parse_tabular_lines(lines: &[&str]) -> Result<Vec<TransactionRecord>, ParseError> {
    let txn_re = Regex::new(concat!(
        r"^(?P<date>\d{2} [A-Za-z]+ \d{4})\s+",
        r"(?P<desc>.+?)\s+",
        r"(?P<amount>[+-]?\d+\.\d{2})\s+",
        r"(?P<balance>\d+\.\d{2})\s*$"
    ))?;

    let mut in_section = false;
    let mut out = Vec::new();

    for line in lines {
        if !in_section {
            if line.contains(HEADER_SENTINEL) {
                in_section = true;
            }
            continue;
        }

        let Some(caps) = txn_re.captures(line) else {
            continue;
        };
        // %B parses full and abbreviated month names.
        let Ok(date) = NaiveDate::parse_from_str(&caps["date"], "%d %B %Y") else {
            continue;
        };
        let Ok(amount) = caps["amount"].parse::<f64>() else {
            continue;
        };
        let Ok(balance) = caps["balance"].parse::<f64>() else {
            continue;
        };

        out.push(TransactionRecord {
            date,
            description: caps["desc"].trim().to_string(),
            amount,
            balance,
            category: None,
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<TransactionRecord> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        parse_tabular_lines(&lines).unwrap()
    }

    #[test]
    fn test_parses_rows_after_header() {
        let text = r#"
Account statement for January
Transaction Date   Description                    Amount    Balance
15 Jan 2024        Grocery Store                  -45.00    1000.00
28 Jan 2024        PAYROLL ACME                  +2100.00   3100.00
"#;
        let records = parse(text);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(records[0].description, "Grocery Store");
        assert_eq!(records[0].amount, -45.00);
        assert_eq!(records[0].balance, 1000.00);
        assert_eq!(records[0].category, None);

        assert_eq!(records[1].amount, 2100.00);
        assert_eq!(records[1].balance, 3100.00);
    }

    #[test]
    fn test_rows_before_header_are_ignored() {
        let text = r#"
15 Jan 2024        Early Row                      -45.00    1000.00
Transaction Date   Description                    Amount    Balance
16 Jan 2024        Real Row                       -10.00     990.00
"#;
        let records = parse(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "Real Row");
    }

    #[test]
    fn test_amount_without_two_decimals_is_dropped() {
        let text = r#"
Transaction Date   Description                    Amount    Balance
01/02/2024         Coffee Shop                    -5
15 Jan 2024        Coffee Shop                    -5        990.00
16 Jan 2024        Coffee Shop                    -5.50     984.50
"#;
        let records = parse(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, -5.50);
    }

    #[test]
    fn test_impossible_calendar_date_drops_only_that_row() {
        let text = r#"
Transaction Date   Description                    Amount    Balance
31 Feb 2024        Ghost Purchase                 -10.00    990.00
01 Mar 2024        Real Purchase                  -10.00    980.00
"#;
        let records = parse(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "Real Purchase");
    }

    #[test]
    fn test_full_month_names_parse() {
        let text = r#"
Transaction Date   Description                    Amount    Balance
15 January 2024    Grocery Store                  -45.00    1000.00
"#;
        let records = parse(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_amount_and_balance_round_trip_exactly() {
        let text = r#"
Transaction Date   Description                    Amount    Balance
15 Jan 2024        Grocery Store                  -45.00    1000.00
"#;
        let records = parse(text);
        assert_eq!(format!("{:.2}", records[0].amount), "-45.00");
        assert_eq!(format!("{:.2}", records[0].balance), "1000.00");
    }
}
