//! One-document pipeline: parse, categorize in one batch, filter.
//!
//! Per-line parser failures never abort the batch; a categorization failure
//! fails the whole upload. Categorization is all-or-nothing per document.

use spendlens_core::{PipelineError, TransactionRecord};
use spendlens_ingest::{StatementDialect, extract_transactions};

use crate::categorize::Categorizer;

/// Parse extracted page text and categorize the result.
pub async fn process_statement<C: Categorizer>(
    pages: &[String],
    dialect: StatementDialect,
    categorizer: &C,
) -> Result<Vec<TransactionRecord>, PipelineError> {
    let records = extract_transactions(pages, dialect)?;
    process_records(records, categorizer).await
}

/// Categorize already-parsed records: one batch call, categories zipped back
/// by position, anything still uncategorized dropped.
pub async fn process_records<C: Categorizer>(
    mut records: Vec<TransactionRecord>,
    categorizer: &C,
) -> Result<Vec<TransactionRecord>, PipelineError> {
    if records.is_empty() {
        return Ok(records);
    }

    let descriptions: Vec<String> = records.iter().map(|r| r.description.clone()).collect();
    let categories = categorizer.categorize(&descriptions).await?;

    for (record, category) in records.iter_mut().zip(categories) {
        record.category = Some(category);
    }

    let before = records.len();
    records.retain(|r| r.category.is_some());
    if records.len() < before {
        tracing::warn!(dropped = before - records.len(), "dropped uncategorized records");
    }

    Ok(records)
}
