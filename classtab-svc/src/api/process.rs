//! Spreadsheet processing endpoints
//!
//! One POST endpoint per input dialect; all three share a single handler
//! body parameterized by the dialect tag. Each accepts `{"file_url": ...}`,
//! fetches the workbook, runs the normalization pipeline and returns a
//! download link for the generated result workbook.

use axum::{
    extract::{Host, State},
    routing::post,
    Json, Router,
};
use classtab_core::Dialect;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::services::{fetcher, workbook};
use crate::AppState;

/// Request body shared by the processing endpoints
#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub file_url: Option<String>,
}

/// Response body shared by the processing endpoints
#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub download_url: String,
    pub message: String,
}

/// POST /process - bracketed-headcount order sheets
pub async fn process_booklist(
    State(state): State<AppState>,
    Host(host): Host,
    Json(request): Json<ProcessRequest>,
) -> ApiResult<Json<ProcessResponse>> {
    process_with_dialect(state, host, Dialect::Bracketed, request).await
}

/// POST /process_winter_homework - trailing-headcount-suffix sheets
pub async fn process_winter_homework(
    State(state): State<AppState>,
    Host(host): Host,
    Json(request): Json<ProcessRequest>,
) -> ApiResult<Json<ProcessResponse>> {
    process_with_dialect(state, host, Dialect::TrailingSuffix, request).await
}

/// POST /process_compact - compact-dash-coded sheets
pub async fn process_compact(
    State(state): State<AppState>,
    Host(host): Host,
    Json(request): Json<ProcessRequest>,
) -> ApiResult<Json<ProcessResponse>> {
    process_with_dialect(state, host, Dialect::CompactDash, request).await
}

async fn process_with_dialect(
    state: AppState,
    host: String,
    dialect: Dialect,
    request: ProcessRequest,
) -> ApiResult<Json<ProcessResponse>> {
    let file_url = request
        .file_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("No file_url provided".to_string()))?;

    let bytes = fetcher::fetch_spreadsheet(&state.http, &file_url).await?;
    let table = workbook::read_table(&bytes)?;

    // The pipeline is synchronous CPU-only work; row counts are small enough
    // that blocking the handler is acceptable
    let rows = classtab_core::process_table(&table, dialect)?;

    let filename = workbook::write_result_workbook(&state.config.static_dir, dialect, &rows)?;
    let download_url = build_download_url(state.config.base_url.as_deref(), &host, &filename);

    tracing::info!(?dialect, rows = rows.len(), url = %download_url, "Processing complete");

    Ok(Json(ProcessResponse {
        download_url,
        message: "success".to_string(),
    }))
}

/// Build the public download link for a generated file.
///
/// Deployments sit behind a TLS-terminating proxy, so plain-http links are
/// rewritten to https.
fn build_download_url(base_url: Option<&str>, host: &str, filename: &str) -> String {
    let base = match base_url {
        Some(base) => base.trim_end_matches('/').to_string(),
        None => format!("http://{host}"),
    };
    let url = format!("{base}/static/{filename}");
    if let Some(rest) = url.strip_prefix("http://") {
        format!("https://{rest}")
    } else {
        url
    }
}

/// Build the processing routes
pub fn process_routes() -> Router<AppState> {
    Router::new()
        .route("/process", post(process_booklist))
        .route("/process_winter_homework", post(process_winter_homework))
        .route("/process_compact", post(process_compact))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_url_prefers_configured_base() {
        let url = build_download_url(
            Some("https://files.example/"),
            "localhost:5780",
            "result_x.xlsx",
        );
        assert_eq!(url, "https://files.example/static/result_x.xlsx");
    }

    #[test]
    fn download_url_from_host_is_rewritten_to_https() {
        let url = build_download_url(None, "classtab.example", "result_x.xlsx");
        assert_eq!(url, "https://classtab.example/static/result_x.xlsx");
    }
}
