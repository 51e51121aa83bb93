use crate::adapters::http::{DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT};
use crate::config::analysis::{AnalysisConfig, LocatorStrategy, Profile, Sampling};
use crate::core::formatter::Locale;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AnalyzerError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub analysis: AnalysisConfig,
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub locale: Locale,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile: Profile = parse_var(&lookup, "ANALYZER_PROFILE")?.unwrap_or_default();
        let mut analysis = AnalysisConfig::for_profile(profile);

        if let Some(strategy) = parse_var::<LocatorStrategy, _>(&lookup, "ANALYZER_LOCATOR")? {
            analysis.locator.strategy = strategy;
        }
        if let Some(sampling) = parse_var::<Sampling, _>(&lookup, "ANALYZER_SAMPLING")? {
            analysis.sampling = sampling;
        }
        if let Some(ratio) = parse_var::<f64, _>(&lookup, "ANALYZER_MATCH_RATIO")? {
            analysis.match_ratio = ratio;
        }

        Ok(Self {
            analysis,
            timeout_seconds: parse_var(&lookup, "FETCH_TIMEOUT_SECONDS")?
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            user_agent: lookup("FETCH_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            locale: parse_var(&lookup, "ANALYZER_LOCALE")?.unwrap_or_default(),
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| AnalyzerError::InvalidConfigValueError {
                field: key.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}

impl ConfigProvider for LambdaConfig {
    fn analysis(&self) -> AnalysisConfig {
        self.analysis
    }

    fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn locale(&self) -> Locale {
        self.locale
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_range("FETCH_TIMEOUT_SECONDS", self.timeout_seconds, 1, 120)?;
        validate_non_empty_string("FETCH_USER_AGENT", &self.user_agent)?;
        self.analysis.validate()?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<LambdaConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LambdaConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.analysis, AnalysisConfig::loose());
        assert_eq!(config.fetch_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECONDS));
        assert_eq!(config.user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(config.locale(), Locale::Ru);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_profile_and_overrides() {
        let config = config_from(&[
            ("ANALYZER_PROFILE", "strict"),
            ("ANALYZER_LOCATOR", "fixed"),
            ("ANALYZER_MATCH_RATIO", "0.15"),
            ("ANALYZER_LOCALE", "en"),
            ("FETCH_TIMEOUT_SECONDS", "15"),
        ])
        .unwrap();

        assert_eq!(config.analysis.sampling, Sampling::Centroid);
        assert_eq!(config.analysis.locator.strategy, LocatorStrategy::Fixed);
        assert_eq!(config.analysis.match_ratio, 0.15);
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.timeout_seconds, 15);
    }

    #[test]
    fn test_invalid_value_names_the_variable() {
        let err = config_from(&[("FETCH_TIMEOUT_SECONDS", "soon")]).unwrap_err();
        match err {
            AnalyzerError::InvalidConfigValueError { field, value, .. } => {
                assert_eq!(field, "FETCH_TIMEOUT_SECONDS");
                assert_eq!(value, "soon");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_blank_value_is_ignored() {
        let config = config_from(&[("ANALYZER_PROFILE", "  ")]).unwrap();
        assert_eq!(config.analysis, AnalysisConfig::loose());
    }
}
