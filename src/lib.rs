pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FileImageSource, HttpImageSource};
pub use app::service::AnalysisService;
pub use config::{analysis::AnalysisConfig, lambda::LambdaConfig, toml_config::TomlConfig};
pub use core::analyzer::GridAnalyzer;
pub use domain::model::{AnalysisResult, Position};
pub use utils::error::{AnalyzerError, Result};
