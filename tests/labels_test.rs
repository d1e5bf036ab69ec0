//! Integration tests for the labels endpoint.

mod common;

use common::spawn_app;
use reqwest::Client;
use std::time::Duration;

#[tokio::test]
async fn labels_lists_all_classes_in_order() {
    let port = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/api/labels", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["success"], true);

    let labels = body["labels"].as_array().unwrap();
    assert_eq!(labels.len(), 29);
    assert_eq!(labels[0], "A");
    assert_eq!(labels[25], "Z");
    assert_eq!(labels[26], "del");
    assert_eq!(labels[27], "nothing");
    assert_eq!(labels[28], "space");
}
