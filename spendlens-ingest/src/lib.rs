//! spendlens-ingest: bank statement text dialects and the CSV importer.

pub mod csv_import;
pub mod dialect;
pub mod parsers;

pub use csv_import::parse_csv_statement;
pub use dialect::{StatementDialect, extract_transactions};
