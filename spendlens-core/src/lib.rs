//! spendlens-core: shared transaction types, error taxonomy, and trend math.

pub mod error;
pub mod transaction;
pub mod trends;

pub use error::{CategorizationError, ParseError, PipelineError};
pub use transaction::{Category, TransactionRecord};
pub use trends::{ForecastPoint, MonthlySummary, forecast, monthly_summary};
