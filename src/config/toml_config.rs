use crate::adapters::http::{DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT};
use crate::config::analysis::{AnalysisConfig, LocatorStrategy, Profile, Sampling};
use crate::core::formatter::Locale;
use crate::domain::model::HueRange;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AnalyzerError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub analysis: AnalysisSection,
    pub locator: LocatorSection,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

/// 未填的欄位沿用 profile 的預設值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSection {
    pub profile: Option<Profile>,
    pub match_ratio: Option<f64>,
    pub sampling: Option<Sampling>,
    pub hue_range: Option<HueRange>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocatorSection {
    pub strategy: Option<LocatorStrategy>,
    pub blur_sigma: Option<f32>,
    pub canny_low: Option<f32>,
    pub canny_high: Option<f32>,
    pub min_area: Option<u64>,
    pub aspect_min: Option<f64>,
    pub aspect_max: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub locale: Option<Locale>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AnalyzerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AnalyzerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${IMAGE_TIMEOUT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AnalyzerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Profile defaults with every explicitly configured field applied on top.
    pub fn analysis_config(&self) -> AnalysisConfig {
        let mut config = AnalysisConfig::for_profile(self.analysis.profile.unwrap_or_default());

        if let Some(ratio) = self.analysis.match_ratio {
            config.match_ratio = ratio;
        }
        if let Some(sampling) = self.analysis.sampling {
            config.sampling = sampling;
        }
        if let Some(range) = self.analysis.hue_range {
            config.hue_range = range;
        }

        let locator = &self.locator;
        if let Some(strategy) = locator.strategy {
            config.locator.strategy = strategy;
        }
        if let Some(sigma) = locator.blur_sigma {
            config.locator.blur_sigma = sigma;
        }
        if let Some(low) = locator.canny_low {
            config.locator.canny_low = low;
        }
        if let Some(high) = locator.canny_high {
            config.locator.canny_high = high;
        }
        if let Some(area) = locator.min_area {
            config.locator.min_area = area;
        }
        if let Some(min) = locator.aspect_min {
            config.locator.aspect_min = min;
        }
        if let Some(max) = locator.aspect_max {
            config.locator.aspect_max = max;
        }

        config
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl ConfigProvider for TomlConfig {
    fn analysis(&self) -> AnalysisConfig {
        self.analysis_config()
    }

    fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds())
    }

    fn user_agent(&self) -> &str {
        self.source.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    fn locale(&self) -> Locale {
        self.output.locale.unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_range("source.timeout_seconds", self.timeout_seconds(), 1, 120)?;
        validate_non_empty_string("source.user_agent", self.user_agent())?;
        self.analysis_config().validate()
    }
}
