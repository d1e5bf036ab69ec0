//! Integration tests for the infrastructure probe endpoints.
//!
//! These run against the mock classifier backend; no model file is needed.

mod common;

use common::spawn_app;
use reqwest::Client;
use std::time::Duration;

#[tokio::test]
async fn health_check_returns_ok() {
    let port = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "recognition-service");
    assert_eq!(body["backend"], "mock");
    assert_eq!(body["model_loaded"], false);
}

#[tokio::test]
async fn readiness_check_returns_ok() {
    let port = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/ready", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
async fn metrics_endpoint_exposes_prediction_counters() {
    let port = spawn_app().await;
    let client = Client::new();

    // Drive one prediction so the counters have samples
    let payload = common::png_payload(8, 8, [128, 128, 128]);
    let response = client
        .post(format!("http://localhost:{}/api/predict", port))
        .json(&serde_json::json!({ "image": payload }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("http://localhost:{}/metrics", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("predict_requests_total"));
    assert!(body.contains("inference_latency_seconds"));
}
