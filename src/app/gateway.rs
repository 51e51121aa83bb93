//! API-Gateway-style envelope around `AnalysisService`: method dispatch, CORS,
//! request body parsing and the JSON response.

use crate::app::service::AnalysisService;
use crate::domain::ports::ImageSource;
use crate::utils::error::{AnalyzerError, Result};
use crate::utils::validation::{validate_required_field, validate_url};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewayRequest {
    #[serde(rename = "httpMethod", default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    #[serde(rename = "isBase64Encoded")]
    pub is_base64_encoded: bool,
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    image_url: Option<String>,
}

impl GatewayResponse {
    fn preflight() -> Self {
        let headers = [
            ("Access-Control-Allow-Origin", "*"),
            ("Access-Control-Allow-Methods", "POST, OPTIONS"),
            ("Access-Control-Allow-Headers", "Content-Type"),
            ("Access-Control-Max-Age", "86400"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            status_code: 200,
            headers,
            body: String::new(),
            is_base64_encoded: false,
        }
    }

    fn json(status_code: u16, body: serde_json::Value) -> Self {
        let headers = [
            ("Content-Type", "application/json"),
            ("Access-Control-Allow-Origin", "*"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            status_code,
            headers,
            body: body.to_string(),
            is_base64_encoded: false,
        }
    }

    fn error(status_code: u16, message: &str) -> Self {
        Self::json(status_code, serde_json::json!({ "error": message }))
    }
}

fn parse_image_url(body: Option<&str>) -> Result<String> {
    let body = body.filter(|b| !b.trim().is_empty()).unwrap_or("{}");
    let request: AnalyzeRequest =
        serde_json::from_str(body).map_err(|e| AnalyzerError::InvalidRequest {
            message: format!("Body is not valid JSON: {}", e),
        })?;

    let image_url = validate_required_field("image_url", &request.image_url)?;
    validate_url("image_url", image_url)?;
    Ok(image_url.clone())
}

pub async fn handle<S: ImageSource>(
    service: &AnalysisService<S>,
    request: &GatewayRequest,
    request_id: &str,
) -> GatewayResponse {
    let method = request
        .http_method
        .as_deref()
        .unwrap_or("GET")
        .to_ascii_uppercase();

    match method.as_str() {
        "OPTIONS" => return GatewayResponse::preflight(),
        "POST" => {}
        other => {
            tracing::warn!("Rejected {} request {}", other, request_id);
            return GatewayResponse::error(405, "Method not allowed");
        }
    }

    let image_url = match parse_image_url(request.body.as_deref()) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("❌ Invalid request {}: {}", request_id, e);
            return GatewayResponse::error(400, &e.to_string());
        }
    };

    match service.run(&image_url).await {
        Ok(result) => GatewayResponse::json(
            200,
            serde_json::json!({
                "positions": result.positions,
                "summary": result.summary,
                "request_id": request_id,
            }),
        ),
        Err(e) if e.is_acquisition() => {
            tracing::error!("❌ Failed to load image for {}: {}", request_id, e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            GatewayResponse::error(400, "Failed to load image")
        }
        Err(e) => {
            tracing::error!("❌ Analysis failed for {}: {}", request_id, e);
            GatewayResponse::error(422, &e.to_string())
        }
    }
}
