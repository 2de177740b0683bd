//! Stacked statement parser (multi-line records, PLN-suffixed amounts).
//!
//! Expected extracted-text shape, one record across several lines:
//!   15 Jan 2024
//!   Data księgowania: 16 Jan 2024
//!   PAYMENT TO JOHN **1234** SMITH
//!   REF 2024/01/0042
//!   -1 234,56 PLN 10 000,00 PLN
//!
//! A bare date line opens a candidate, description lines accumulate until the
//! first line carrying a PLN amount, and the joined text is matched in one go.

use chrono::NaiveDate;
use regex::Regex;

use spendlens_core::{ParseError, TransactionRecord};

/// Parse trimmed statement lines into transactions.
///
/// A candidate that fails the combined grammar (or numeric normalization) is
/// dropped and the scan resumes right after its amount line.
pub fn parse_stacked_lines(lines: &[&str]) -> Result<Vec<TransactionRecord>, ParseError> {
    let date_re = Regex::new(r"^\d{2} [A-Za-z]+ \d{4}$")?;
    let currency_re = Regex::new(r"\d\s*PLN")?;
    let record_re = Regex::new(concat!(
        r"^(?P<desc>.+?)\s+",
        r"(?P<sign>-)?(?P<amount>\d{1,3}(?:\s\d{3})*[.,]\d{2})\s*PLN\s+",
        r"(?P<balance>\d{1,3}(?:\s\d{3})*[.,]\d{2})\s*PLN$"
    ))?;
    // Masked account fragments: digits/letters fenced by two or more asterisks.
    let masked_re = Regex::new(r"\*{2,}[0-9A-Za-z]+\*{2,}")?;

    let mut out = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if !date_re.is_match(lines[i]) {
            i += 1;
            continue;
        }
        // %B parses full and abbreviated month names.
        let date = NaiveDate::parse_from_str(lines[i], "%d %B %Y");

        let mut j = i + 1;
        if j < lines.len() && is_booking_label(lines[j]) {
            j += 1;
        }

        // Collect description lines until the first line carrying an amount.
        let mut parts: Vec<&str> = Vec::new();
        while j < lines.len() && !currency_re.is_match(lines[j]) {
            parts.push(lines[j]);
            j += 1;
        }
        if j >= lines.len() {
            // Candidate never reached an amount line; nothing more to scan.
            break;
        }
        parts.push(lines[j]);
        let joined = parts.join(" ");

        if let (Ok(date), Some(caps)) = (date, record_re.captures(&joined)) {
            let amount = normalize_amount(&caps["amount"]);
            let balance = normalize_amount(&caps["balance"]);
            if let (Some(amount), Some(balance)) = (amount, balance) {
                let amount = if caps.name("sign").is_some() { -amount } else { amount };
                out.push(TransactionRecord {
                    date,
                    description: scrub_description(&masked_re, &caps["desc"]),
                    amount,
                    balance,
                    category: None,
                });
            }
        }

        i = j + 1;
    }

    Ok(out)
}

/// `"1 234,56"` → `1234.56`: drop thousands spaces (including non-breaking),
/// decimal comma becomes a point.
fn normalize_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.parse().ok()
}

fn scrub_description(masked_re: &Regex, raw: &str) -> String {
    let stripped = masked_re.replace_all(raw, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_booking_label(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.starts_with("booking date") || lower.starts_with("data księgowania")
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
        parse_stacked_lines(&lines).unwrap()
    }

    #[test]
    fn test_parses_multi_line_record() {
        let text = r#"
15 Jan 2024
Data księgowania: 16 Jan 2024
BIEDRONKA 113 WARSZAWA
REF 2024/01/0042
-45,00 PLN 1 000,00 PLN
"#;
        let records = parse(text);
        assert_eq!(records.len(), 1);

        let rec = &records[0];
        assert_eq!(rec.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(rec.description, "BIEDRONKA 113 WARSZAWA REF 2024/01/0042");
        assert_eq!(rec.amount, -45.00);
        assert_eq!(rec.balance, 1000.00);
    }

    #[test]
    fn test_thousands_spaces_and_decimal_comma_normalize() {
        assert_eq!(normalize_amount("1 234,56"), Some(1234.56));
        assert_eq!(normalize_amount("1\u{a0}234,56"), Some(1234.56));
        assert_eq!(normalize_amount("12 345 678,90"), Some(12345678.90));
        assert_eq!(normalize_amount("45.00"), Some(45.00));
        assert_eq!(normalize_amount("4,5,6"), None);
    }

    #[test]
    fn test_sign_applies_only_when_captured() {
        let text = r#"
02 Feb 2024
SALARY TRANSFER
12 500,00 PLN 14 000,00 PLN
03 Feb 2024
CARD PAYMENT
-1 234,56 PLN 12 765,44 PLN
"#;
        let records = parse(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].amount, 12500.00);
        assert_eq!(records[1].amount, -1234.56);
        assert_eq!(records[1].balance, 12765.44);
    }

    #[test]
    fn test_masked_account_tokens_are_stripped() {
        let text = r#"
15 Jan 2024
PAYMENT TO JOHN **1234** SMITH
-100,00 PLN 900,00 PLN
"#;
        let records = parse(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "PAYMENT TO JOHN SMITH");
    }

    #[test]
    fn test_booking_label_line_is_skipped() {
        let text = r#"
15 Jan 2024
Booking date: 16 Jan 2024
COFFEE CORNER
-12,50 PLN 987,50 PLN
"#;
        let records = parse(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "COFFEE CORNER");
    }

    #[test]
    fn test_malformed_candidate_is_dropped_and_scan_resumes() {
        // First candidate's amount line carries a PLN amount but no balance,
        // so the combined grammar fails; the record after it still parses.
        let text = r#"
15 Jan 2024
BROKEN ROW
-45,00 PLN
16 Jan 2024
GOOD ROW
-10,00 PLN 990,00 PLN
"#;
        let records = parse(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "GOOD ROW");
    }

    #[test]
    fn test_candidate_without_amount_line_yields_nothing() {
        let text = r#"
15 Jan 2024
DESCRIPTION THAT NEVER ENDS
"#;
        assert!(parse(text).is_empty());
    }

    #[test]
    fn test_records_come_out_in_source_order() {
        let text = r#"
01 Mar 2024
FIRST
-1,00 PLN 99,00 PLN
02 Mar 2024
SECOND
-2,00 PLN 97,00 PLN
03 Mar 2024
THIRD
-3,00 PLN 94,00 PLN
"#;
        let descriptions: Vec<String> = parse(text).into_iter().map(|r| r.description).collect();
        assert_eq!(descriptions, vec!["FIRST", "SECOND", "THIRD"]);
    }
}
