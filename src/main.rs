use anyhow::{anyhow, Context};
use clap::Parser;
use qalais_analyzer::utils::error::ErrorCategory;
use qalais_analyzer::utils::{logger, validation::Validate};
use qalais_analyzer::{AnalysisService, AnalyzerError, CliConfig, FileImageSource};

fn exit_with(e: &AnalyzerError) -> ! {
    tracing::error!("❌ Analysis failed: {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.category() {
        ErrorCategory::Configuration | ErrorCategory::Request => 2,
        ErrorCategory::Acquisition => 3,
        ErrorCategory::Analysis => 4,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting qalais-analyzer CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        exit_with(&e);
    }
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    let outcome = match (&cli.url, &cli.file) {
        (Some(url), _) => match AnalysisService::http(&config) {
            Ok(service) => service.run(url).await,
            Err(e) => Err(e),
        },
        (None, Some(path)) => match AnalysisService::from_config(FileImageSource::new(), &config) {
            Ok(service) => service.run(path).await,
            Err(e) => Err(e),
        },
        (None, None) => return Err(anyhow!("either --url or --file is required")),
    };

    match outcome {
        Ok(result) => {
            let json = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
            println!("{}", json);
            eprintln!("🎯 {}", result.summary);
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}
