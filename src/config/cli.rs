use crate::config::analysis::{LocatorStrategy, Profile, Sampling};
use crate::config::toml_config::TomlConfig;
use crate::core::formatter::Locale;
use crate::utils::error::Result;
use crate::utils::validation::{validate_image_extension, validate_url, Validate};
use clap::{ArgGroup, Parser};

#[derive(Debug, Clone, Parser)]
#[command(name = "qalais-analyzer")]
#[command(about = "Finds the winning cells on a 5x3 game board screenshot")]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["url", "file"])
))]
pub struct CliConfig {
    /// Direct URL of the board screenshot
    #[arg(long)]
    pub url: Option<String>,

    /// Local screenshot file
    #[arg(long)]
    pub file: Option<String>,

    /// TOML configuration file; flags below override it
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, value_enum)]
    pub profile: Option<Profile>,

    #[arg(long, value_enum)]
    pub locator: Option<LocatorStrategy>,

    #[arg(long, value_enum)]
    pub sampling: Option<Sampling>,

    /// Fraction of red pixels a cell needs to win
    #[arg(long)]
    pub match_ratio: Option<f64>,

    #[arg(long, value_enum)]
    pub locale: Option<Locale>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Loads `--config` (or defaults) and applies the command-line overrides.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(profile) = self.profile {
            config.analysis.profile = Some(profile);
        }
        if let Some(strategy) = self.locator {
            config.locator.strategy = Some(strategy);
        }
        if let Some(sampling) = self.sampling {
            config.analysis.sampling = Some(sampling);
        }
        if let Some(ratio) = self.match_ratio {
            config.analysis.match_ratio = Some(ratio);
        }
        if let Some(locale) = self.locale {
            config.output.locale = Some(locale);
        }
        if let Some(timeout) = self.timeout_seconds {
            config.source.timeout_seconds = Some(timeout);
        }

        config.validate()?;
        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.url {
            validate_url("url", url)?;
        }
        if let Some(file) = &self.file {
            validate_image_extension("file", file)?;
        }
        Ok(())
    }
}
