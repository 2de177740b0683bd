//! Batch categorization of transaction descriptions.
//!
//! The whole batch goes out as a single prompt and comes back as a JSON array
//! aligned by position. The response is validated hard: wrong length or a
//! label outside the category set fails the batch.

use std::future::Future;
use std::sync::Arc;

use spendlens_core::{CategorizationError, Category};

use crate::gemini::GeminiClient;

/// Seam between the pipeline and whatever assigns categories. The pipeline is
/// generic over this so tests can stub the model out.
pub trait Categorizer: Send + Sync {
    /// Given N descriptions, return exactly N categories in input order.
    fn categorize(
        &self,
        descriptions: &[String],
    ) -> impl Future<Output = Result<Vec<Category>, CategorizationError>> + Send;
}

/// Categorizer backed by the hosted generative model.
#[derive(Debug, Clone)]
pub struct GeminiCategorizer {
    client: Arc<GeminiClient>,
}

impl GeminiCategorizer {
    pub fn new(client: Arc<GeminiClient>) -> Self {
        Self { client }
    }
}

impl Categorizer for GeminiCategorizer {
    async fn categorize(&self, descriptions: &[String]) -> Result<Vec<Category>, CategorizationError> {
        if descriptions.is_empty() {
            return Ok(Vec::new());
        }

        let prompt = build_prompt(descriptions);
        tracing::debug!(
            descriptions = descriptions.len(),
            prompt_bytes = prompt.len(),
            "requesting categorization"
        );

        let raw = self.client.generate(&prompt).await?;
        parse_category_response(&raw, descriptions.len())
    }
}

/// Build the single batch prompt: the closed category set, the output
/// contract, then one `- description` line per input.
///
/// Prompt length grows linearly with the batch; very large statements would
/// need chunking against provider input caps.
pub fn build_prompt(descriptions: &[String]) -> String {
    let mut prompt =
        String::from("Categorize the following transaction descriptions into one of these categories:\n");
    for cat in Category::ALL {
        prompt.push_str("- ");
        prompt.push_str(cat.label());
        prompt.push('\n');
    }
    prompt.push_str("\nKeep in mind the data is for Poland and organizations may be Polish.\n");
    prompt.push_str("Return a JSON array of the categories, in the same order as the input.\n");
    prompt.push_str(&format!(
        "The array must have exactly {} entries, one per description.\n\nDescriptions:\n",
        descriptions.len()
    ));
    for desc in descriptions {
        prompt.push_str("- ");
        prompt.push_str(desc);
        prompt.push('\n');
    }
    prompt
}

/// Parse and validate the raw model text against the expected batch size.
pub fn parse_category_response(
    raw: &str,
    expected: usize,
) -> Result<Vec<Category>, CategorizationError> {
    // Models like to wrap JSON in code fences.
    let cleaned = raw.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    let value: serde_json::Value =
        serde_json::from_str(cleaned).map_err(|e| CategorizationError::InvalidJson(e.to_string()))?;
    let entries = value.as_array().ok_or(CategorizationError::NotAnArray)?;

    if entries.len() != expected {
        return Err(CategorizationError::LengthMismatch {
            expected,
            got: entries.len(),
        });
    }

    entries
        .iter()
        .map(|entry| {
            let label = entry
                .as_str()
                .ok_or_else(|| CategorizationError::UnknownCategory(entry.to_string()))?;
            Category::from_label(label)
                .ok_or_else(|| CategorizationError::UnknownCategory(label.to_string()))
        })
        .collect()
}
