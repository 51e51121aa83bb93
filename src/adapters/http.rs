use crate::core::analyzer::decode_image;
use crate::domain::ports::ImageSource;
use crate::utils::error::{AnalyzerError, Result};
use async_trait::async_trait;
use image::RgbImage;
use reqwest::Client;
use std::time::Duration;

/// Image hosts tend to refuse clients that do not look like a browser.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone)]
pub struct HttpImageSource {
    client: Client,
}

impl HttpImageSource {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| AnalyzerError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch(&self, location: &str) -> Result<RgbImage> {
        tracing::debug!("Fetching image from: {}", location);
        let response = self
            .client
            .get(location)
            .send()
            .await
            .map_err(|source| AnalyzerError::Unreachable {
                url: location.to_string(),
                source,
            })?;

        let status = response.status();
        tracing::debug!("Image response status: {}", status);
        if !status.is_success() {
            return Err(AnalyzerError::HttpStatus {
                url: location.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| AnalyzerError::Unreachable {
                url: location.to_string(),
                source,
            })?;
        tracing::debug!("Downloaded {} bytes", bytes.len());

        decode_image(&bytes)
    }
}
