use crate::adapters::http::HttpImageSource;
use crate::core::analyzer::GridAnalyzer;
use crate::core::formatter::LocaleFormatter;
use crate::domain::model::AnalysisResult;
use crate::domain::ports::{ConfigProvider, ImageSource};
use crate::utils::error::Result;

/// Fetches one image through `S` and runs the grid analysis on it.
pub struct AnalysisService<S: ImageSource> {
    source: S,
    analyzer: GridAnalyzer,
}

impl<S: ImageSource> AnalysisService<S> {
    pub fn new(source: S, analyzer: GridAnalyzer) -> Self {
        Self { source, analyzer }
    }

    pub fn from_config<C: ConfigProvider>(source: S, config: &C) -> Result<Self> {
        let analyzer = GridAnalyzer::new(config.analysis(), LocaleFormatter::new(config.locale()))?;
        Ok(Self::new(source, analyzer))
    }

    pub async fn run(&self, location: &str) -> Result<AnalysisResult> {
        tracing::info!("📥 Loading image: {}", location);
        let image = self.source.fetch(location).await?;

        tracing::info!("🔍 Analyzing {}x{} image", image.width(), image.height());
        let result = self.analyzer.analyze(&image)?;

        tracing::info!("✅ Analysis finished: {}", result.summary);
        Ok(result)
    }
}

impl AnalysisService<HttpImageSource> {
    /// HTTP-backed service using the timeout and client identity from `config`.
    pub fn http<C: ConfigProvider>(config: &C) -> Result<Self> {
        let source = HttpImageSource::new(config.fetch_timeout(), config.user_agent())?;
        Self::from_config(source, config)
    }
}
