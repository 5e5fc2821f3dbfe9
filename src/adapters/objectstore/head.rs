//! HTTP HEAD upload probe
//!
//! Metadata-only request against the artifact URL. Any non-2xx status or
//! transport error counts as "not yet available", never as a watch
//! failure.

use super::UploadProbe;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// [`UploadProbe`] backed by `reqwest` HEAD requests
pub struct HttpHeadProbe {
    client: reqwest::Client,
}

impl HttpHeadProbe {
    /// Probe with a bounded per-request timeout so one hung request can
    /// never eat the whole watch deadline
    pub fn new(request_timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }

    /// Probe reusing an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpHeadProbe {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

#[async_trait]
impl UploadProbe for HttpHeadProbe {
    async fn exists(&self, url: &Url) -> bool {
        match self.client.head(url.clone()).send().await {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    tracing::debug!(url = %url, status = %status, "Upload not done yet, waiting");
                }
                status.is_success()
            }
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Probe request failed, treating as not yet available");
                false
            }
        }
    }
}
