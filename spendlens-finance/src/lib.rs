//! spendlens-finance: model-backed categorization, the statement pipeline,
//! and the insights report.

pub mod categorize;
pub mod gemini;
pub mod insights;
pub mod pipeline;

pub use categorize::{Categorizer, GeminiCategorizer, build_prompt, parse_category_response};
pub use gemini::{GeminiClient, GeminiConfig};
pub use insights::{build_insights_prompt, generate_report};
pub use pipeline::{process_records, process_statement};
