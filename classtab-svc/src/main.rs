//! classtab-svc - textbook-order class-list normalization service
//!
//! Accepts a spreadsheet URL per request, extracts (class, headcount) facts
//! from free-form class cells in one of three notations, and publishes the
//! normalized, sequence-numbered result workbook under /static.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use classtab_svc::config::{CliArgs, ServiceConfig};
use classtab_svc::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting classtab-svc v{}", env!("CARGO_PKG_VERSION"));

    let args = CliArgs::parse();
    let config = ServiceConfig::resolve(&args);

    // Generated workbooks are served from here; create it up front
    std::fs::create_dir_all(&config.static_dir)?;
    info!("Static directory: {}", config.static_dir.display());

    let addr = format!("0.0.0.0:{}", config.port);
    let state = AppState::new(config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}");
    info!("Health check: http://{addr}/health");

    axum::serve(listener, app).await?;

    Ok(())
}
