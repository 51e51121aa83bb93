mod common;

use async_trait::async_trait;
use common::{board_with_red_cells, encode_png};
use httpmock::prelude::*;
use image::RgbImage;
use qalais_analyzer::app::gateway::{handle, GatewayRequest};
use qalais_analyzer::core::formatter::Locale;
use qalais_analyzer::domain::ports::ImageSource;
use qalais_analyzer::{AnalysisService, Result, TomlConfig};
use serde_json::Value;

fn english_config() -> TomlConfig {
    let mut config = TomlConfig::default();
    config.output.locale = Some(Locale::En);
    config.source.timeout_seconds = Some(5);
    config
}

fn post(body: &str) -> GatewayRequest {
    GatewayRequest {
        http_method: Some("POST".to_string()),
        body: Some(body.to_string()),
    }
}

fn body_json(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}

#[tokio::test]
async fn test_options_preflight_returns_cors_headers() {
    let service = AnalysisService::http(&english_config()).unwrap();
    let request = GatewayRequest {
        http_method: Some("OPTIONS".to_string()),
        body: None,
    };

    let response = handle(&service, &request, "req-preflight").await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
    assert_eq!(response.headers["Access-Control-Allow-Methods"], "POST, OPTIONS");
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_other_methods_are_rejected() {
    let service = AnalysisService::http(&english_config()).unwrap();

    for method in [Some("GET"), Some("put"), None] {
        let request = GatewayRequest {
            http_method: method.map(str::to_string),
            body: Some(r#"{"image_url": "https://example.com/a.png"}"#.to_string()),
        };
        let response = handle(&service, &request, "req-method").await;
        assert_eq!(response.status_code, 405);
    }
}

#[tokio::test]
async fn test_bad_bodies_are_400() {
    let service = AnalysisService::http(&english_config()).unwrap();

    for body in ["", "{broken", r#"{"other": 1}"#, r#"{"image_url": "board.png"}"#] {
        let response = handle(&service, &post(body), "req-bad").await;
        assert_eq!(response.status_code, 400, "body: {}", body);
        assert!(body_json(&response.body)["error"].is_string());
    }
}

#[tokio::test]
async fn test_successful_analysis_returns_positions_and_summary() {
    let server = MockServer::start_async().await;
    let png = encode_png(&board_with_red_cells(&[(1, 2), (4, 0)]));
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/board.png");
            then.status(200).header("content-type", "image/png").body(png);
        })
        .await;

    let service = AnalysisService::http(&english_config()).unwrap();
    let body = serde_json::json!({ "image_url": server.url("/board.png") }).to_string();

    let response = handle(&service, &post(&body), "req-42").await;

    mock.assert_async().await;
    assert_eq!(response.status_code, 200);
    assert_eq!(response.headers["Content-Type"], "application/json");

    let json = body_json(&response.body);
    assert_eq!(
        json["positions"],
        serde_json::json!([{ "row": 1, "col": 2 }, { "row": 4, "col": 0 }])
    );
    assert_eq!(json["summary"], "column 3, cell 2, column 1, cell 5");
    assert_eq!(json["request_id"], "req-42");
}

#[tokio::test]
async fn test_unloadable_image_is_400() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/gone.png");
            then.status(410);
        })
        .await;

    let service = AnalysisService::http(&english_config()).unwrap();
    let body = serde_json::json!({ "image_url": server.url("/gone.png") }).to_string();

    let response = handle(&service, &post(&body), "req-gone").await;

    assert_eq!(response.status_code, 400);
    assert_eq!(body_json(&response.body)["error"], "Failed to load image");
}

struct EmptySource;

#[async_trait]
impl ImageSource for EmptySource {
    async fn fetch(&self, _location: &str) -> Result<RgbImage> {
        Ok(RgbImage::new(0, 0))
    }
}

#[tokio::test]
async fn test_empty_image_is_422() {
    let service = AnalysisService::from_config(EmptySource, &english_config()).unwrap();
    let body = r#"{"image_url": "https://example.com/empty.png"}"#;

    let response = handle(&service, &post(body), "req-empty").await;

    assert_eq!(response.status_code, 422);
    assert!(body_json(&response.body)["error"].is_string());
}
