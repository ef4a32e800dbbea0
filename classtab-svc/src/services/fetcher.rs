//! Source spreadsheet download

use crate::error::{ApiError, ApiResult};

/// Fetch the spreadsheet bytes behind a file URL.
///
/// Any transport failure or non-success status maps to a fetch error; the
/// caller surfaces it as a bad gateway. Retry/backoff is deliberately absent
/// here - callers re-submit.
pub async fn fetch_spreadsheet(client: &reqwest::Client, file_url: &str) -> ApiResult<Vec<u8>> {
    tracing::info!(url = %file_url, "Fetching source spreadsheet");

    let response = client
        .get(file_url)
        .send()
        .await
        .map_err(|e| ApiError::Fetch(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Fetch(format!(
            "Upstream returned {status} for {file_url}"
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::Fetch(e.to_string()))?;

    tracing::debug!(bytes = bytes.len(), "Source spreadsheet fetched");
    Ok(bytes.to_vec())
}
