//! Free-text insights report over categorized records.

use spendlens_core::{CategorizationError, TransactionRecord};

use crate::gemini::GeminiClient;

/// One line per record, then the four asks the report should cover.
pub fn build_insights_prompt(records: &[TransactionRecord]) -> String {
    let mut prompt = String::from("Analyze the following financial data and provide insights:\n");
    for rec in records {
        let kind = if rec.is_expense() { "expense" } else { "income" };
        let category = rec.category.map(|c| c.label()).unwrap_or("Uncategorized");
        prompt.push_str(&format!(
            "- {}: {} (${:.2}, {}, {}, Balance: ${:.2})\n",
            rec.date,
            rec.description,
            rec.amount.abs(),
            kind,
            category,
            rec.balance
        ));
    }
    prompt.push_str(
        "\nInsights should include:\n\
         1. Spending trends over time.\n\
         2. Budget recommendations.\n\
         3. Savings tips.\n\
         4. Balance trends and suggestions for improving savings.\n",
    );
    prompt
}

pub async fn generate_report(
    client: &GeminiClient,
    records: &[TransactionRecord],
) -> Result<String, CategorizationError> {
    let prompt = build_insights_prompt(records);
    tracing::debug!(
        records = records.len(),
        prompt_bytes = prompt.len(),
        "requesting insights report"
    );
    client.generate(&prompt).await
}
