#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use qalais_analyzer::app::gateway::{self, GatewayRequest, GatewayResponse};
#[cfg(feature = "lambda")]
use qalais_analyzer::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use qalais_analyzer::{AnalysisService, HttpImageSource, LambdaConfig};

#[cfg(feature = "lambda")]
async fn function_handler(
    service: &AnalysisService<HttpImageSource>,
    event: LambdaEvent<GatewayRequest>,
) -> Result<GatewayResponse, Error> {
    let (request, context) = event.into_parts();
    tracing::info!("Handling analyze request {}", context.request_id);

    let response = gateway::handle(service, &request, &context.request_id).await;

    tracing::info!(
        "Request {} completed with status {}",
        context.request_id,
        response.status_code
    );
    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 服務在冷啟動時建立一次，之後每個請求共用
    let config = LambdaConfig::from_env()?;
    config.validate()?;
    let service = AnalysisService::http(&config)?;
    let service = &service;

    run(service_fn(move |event| async move {
        function_handler(service, event).await
    }))
    .await
}
