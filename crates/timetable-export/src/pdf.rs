use timetable_core::keys::DOWNLOAD_PDF_PATH;
use timetable_core::models::Bundle;

use crate::error::ExportError;

/// Client for the server-side PDF renderer.
///
/// Each call is a single request: no retry, no timeout, and no guard
/// against overlapping calls.
#[derive(Debug, Clone)]
pub struct PdfClient {
    http: reqwest::Client,
    endpoint: String,
}

impl PdfClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), DOWNLOAD_PDF_PATH);
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the bundle as JSON and return the response body as raw bytes.
    ///
    /// Any non-2xx status is [`ExportError::Status`]; connection and body
    /// read failures are [`ExportError::Transport`].
    pub async fn download_pdf(&self, bundle: &Bundle) -> Result<Vec<u8>, ExportError> {
        tracing::debug!(endpoint = %self.endpoint, "requesting PDF");

        let response = self.http.post(&self.endpoint).json(bundle).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExportError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        tracing::info!(bytes = body.len(), "PDF received");
        Ok(body.to_vec())
    }
}
