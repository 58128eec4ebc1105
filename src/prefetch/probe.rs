use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

use crate::errors::ProviderError;

/// Lightweight existence check for a remote asset
#[async_trait]
pub trait AssetProbe: Send + Sync {
    /// Succeeds when the asset is reachable
    async fn probe(&self, url: &str) -> Result<(), ProviderError>;
}

/// Probe issuing an HTTP HEAD request
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }
}

impl Default for HttpProbe {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

#[async_trait]
impl AssetProbe for HttpProbe {
    async fn probe(&self, url: &str) -> Result<(), ProviderError> {
        let response = self
            .client
            .head(url)
            .header("Cache-Control", "max-age=3600")
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!("HEAD {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: format!("HEAD {} returned {}", url, status),
            });
        }

        debug!("Probe ok: {}", url);
        Ok(())
    }
}
