use crate::config::analysis::AnalysisConfig;
use crate::core::formatter::Locale;
use crate::utils::error::Result;
use async_trait::async_trait;
use image::RgbImage;
use std::time::Duration;

/// Acquires a decoded 3-channel image from somewhere outside the process.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<RgbImage>;
}

pub trait ConfigProvider: Send + Sync {
    fn analysis(&self) -> AnalysisConfig;
    fn fetch_timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
    fn locale(&self) -> Locale;
}
