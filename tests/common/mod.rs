//! Common test utilities for recognition-service integration tests.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{Rgb, RgbImage};
use recognition_service::config::RecognitionConfig;
use recognition_service::services::init_metrics;
use recognition_service::startup::Application;
use std::io::Cursor;
use std::sync::Once;
use std::time::Duration;

static INIT: Once = Once::new();

/// Initialize tracing and metrics for tests (only once per process).
fn init_once() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,recognition_service=debug")
            .with_test_writer()
            .try_init()
            .ok();
        init_metrics();
    });
}

/// Spawn the application on a random port with the mock classifier backend
/// and return the port number.
pub async fn spawn_app() -> u16 {
    init_once();

    // Test environment: random port, no model file required
    std::env::set_var("ENVIRONMENT", "test");
    std::env::set_var("APP__PORT", "0");
    std::env::set_var("MODEL_ENABLED", "false");

    let config = RecognitionConfig::load().expect("Failed to load config");
    let app = Application::build(config)
        .await
        .expect("Failed to build application");

    let port = app.port();

    // Spawn the server in the background
    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

/// Base64-encode a solid-color PNG suitable for prediction requests.
#[allow(dead_code)]
pub fn png_payload(width: u32, height: u32, color: [u8; 3]) -> String {
    let img = RgbImage::from_pixel(width, height, Rgb(color));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("Failed to encode test PNG");
    STANDARD.encode(&bytes)
}
