use serde::{Deserialize, Serialize};
use spendlens_core::{ParseError, TransactionRecord};

use crate::parsers;

/// Which statement layout to parse. Callers pick the dialect explicitly;
/// nothing is inferred from the text itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementDialect {
    /// One transaction per line, after a "Transaction Date" header row.
    Tabular,
    /// Date on its own line, wrapped description lines, then a PLN amount line.
    Stacked,
}

/// Parse extracted page text into ordered, uncategorized transaction records.
///
/// Fails only when no pages were provided at all. Pages that match nothing
/// produce an empty list: partial extraction beats total failure, so malformed
/// lines are skipped, never raised.
pub fn extract_transactions(
    pages: &[String],
    dialect: StatementDialect,
) -> Result<Vec<TransactionRecord>, ParseError> {
    if pages.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let text = pages.join("\n");
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    match dialect {
        StatementDialect::Tabular => parsers::tabular::parse_tabular_lines(&lines),
        StatementDialect::Stacked => parsers::stacked::parse_stacked_lines(&lines),
    }
}
