//! Credlens Web Dashboard - loan-decision explainability.

use anyhow::Result;
use clap::Parser;
use credlens_core::config::DashboardConfig;
use credlens_model::{context::resolve_data_dir, AppContext};
use std::path::PathBuf;

mod routes;
mod state;

pub use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "credlens-web")]
#[command(about = "Credlens Web Dashboard - loan-decision explainability")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Directory holding the model and data artifacts
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Risk value at or above which a loan is denied
    #[arg(long)]
    threshold: Option<f64>,

    /// Load only the first N customers (0 = all)
    #[arg(long)]
    sample: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let addr = format!("{}:{}", cli.host, cli.port);

    let mut config = DashboardConfig::default();
    if let Some(threshold) = cli.threshold {
        config.threshold = threshold;
    }
    if let Some(sample) = cli.sample {
        config.sample_cap = if sample == 0 { None } else { Some(sample) };
    }

    let data_dir = resolve_data_dir(cli.data_dir);
    tracing::info!(data_dir = %data_dir.display(), "loading artifacts");

    // Load everything up front; a missing artifact aborts startup.
    let ctx = AppContext::load(&data_dir, config)?;
    tracing::info!(
        customers = ctx.customers.len(),
        features = ctx.customers.feature_count(),
        classifiers = ctx.classifiers.len(),
        explainers = ctx.explainers.len(),
        "artifacts loaded"
    );

    let state = AppState::new(ctx);

    // Build router
    let app = routes::create_router(state);

    println!("Starting Credlens Web Dashboard...");
    println!("Open http://{} in your browser", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
