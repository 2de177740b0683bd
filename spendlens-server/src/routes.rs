//! HTTP surface: upload, trends, forecast, insights.
//!
//! Handlers stay thin; everything interesting happens in the finance and
//! ingest crates. Status mapping: parse problems are the client's fault
//! (400), model round-trip failures are upstream's (502), auth is 401.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use spendlens_core::{CategorizationError, ParseError, PipelineError, TransactionRecord, trends};
use spendlens_finance::{GeminiCategorizer, GeminiClient, generate_report, process_records};
use spendlens_ingest::{StatementDialect, extract_transactions, parse_csv_statement};

use crate::auth::{AuthError, TokenVerifier, verify_bearer};
use crate::store::{StoredTransaction, TransactionStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TransactionStore>,
    pub verifier: Arc<dyn TokenVerifier>,
    pub categorizer: Arc<GeminiCategorizer>,
    pub model: Arc<GeminiClient>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/statements", post(upload_statement))
        .route("/trends", get(get_trends))
        .route("/trends/forecast", get(get_forecast))
        .route("/insights", post(post_insights))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Uniform JSON error body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: err.to_string(),
        }
    }
}

impl From<ParseError> for ApiError {
    fn from(err: ParseError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        }
    }
}

impl From<CategorizationError> for ApiError {
    fn from(err: CategorizationError) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: err.to_string(),
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Parse(e) => e.into(),
            PipelineError::Categorization(e) => e.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadFormat {
    Tabular,
    Stacked,
    Csv,
}

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    pub format: UploadFormat,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub transactions: Vec<StoredTransaction>,
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn upload_statement(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<UploadRequest>,
) -> Result<Json<UploadResponse>, ApiError> {
    let user_id = verify_bearer(&headers, state.verifier.as_ref()).await?;

    let parsed = match req.format {
        UploadFormat::Csv => parse_csv_statement(req.content.as_bytes())?,
        UploadFormat::Tabular => {
            extract_transactions(std::slice::from_ref(&req.content), StatementDialect::Tabular)?
        }
        UploadFormat::Stacked => {
            extract_transactions(std::slice::from_ref(&req.content), StatementDialect::Stacked)?
        }
    };

    let categorized = process_records(parsed, state.categorizer.as_ref()).await?;
    let stored: Vec<StoredTransaction> =
        categorized.into_iter().map(StoredTransaction::new).collect();

    state.store.append(&user_id, stored.clone());
    tracing::info!(user = %user_id, count = stored.len(), "statement processed");

    Ok(Json(UploadResponse { transactions: stored }))
}

async fn get_trends(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user_id = verify_bearer(&headers, state.verifier.as_ref()).await?;
    let records = user_records(&state, &user_id);
    let months = trends::monthly_summary(&records);
    Ok(Json(json!({ "months": months })))
}

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    months: Option<u32>,
}

async fn get_forecast(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user_id = verify_bearer(&headers, state.verifier.as_ref()).await?;
    let months_ahead = query.months.unwrap_or(3).clamp(1, 12);

    let records = user_records(&state, &user_id);
    let summaries = trends::monthly_summary(&records);
    let points = trends::forecast(&summaries, months_ahead);

    Ok(Json(json!({ "months_ahead": months_ahead, "points": points })))
}

async fn post_insights(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user_id = verify_bearer(&headers, state.verifier.as_ref()).await?;
    let records = user_records(&state, &user_id);
    let report = generate_report(state.model.as_ref(), &records).await?;
    Ok(Json(json!({ "insights": report })))
}

fn user_records(state: &AppState, user_id: &str) -> Vec<TransactionRecord> {
    state
        .store
        .for_user(user_id)
        .into_iter()
        .map(|s| s.record)
        .collect()
}
