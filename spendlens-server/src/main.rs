use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use spendlens_finance::{GeminiCategorizer, GeminiClient};

mod auth;
mod config;
mod routes;
mod store;

use auth::HttpTokenVerifier;
use routes::AppState;
use store::MemoryStore;

#[derive(Parser, Debug)]
#[command(
    name = "spendlens-server",
    version,
    about = "Statement ingestion and spending-trends API"
)]
struct Cli {
    /// Path to a TOML config file; defaults plus env overrides otherwise
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;

    let model = Arc::new(
        GeminiClient::new(cfg.gemini.to_client_config()).context("build model client")?,
    );
    let state = AppState {
        store: Arc::new(MemoryStore::default()),
        verifier: Arc::new(HttpTokenVerifier::new(cfg.identity.verify_url.clone())),
        categorizer: Arc::new(GeminiCategorizer::new(model.clone())),
        model,
    };

    let app = routes::router(state);
    let listener = tokio::net::TcpListener::bind(&cfg.server.bind)
        .await
        .with_context(|| format!("bind {}", cfg.server.bind))?;
    tracing::info!(addr = %cfg.server.bind, model = %cfg.gemini.model, "listening");
    axum::serve(listener, app).await.context("serve")?;

    Ok(())
}
