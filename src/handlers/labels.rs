use axum::{Json, extract::State};
use serde::Serialize;

use crate::startup::AppState;

#[derive(Debug, Serialize)]
pub struct LabelsResponse {
    pub success: bool,
    pub labels: Vec<String>,
}

/// List all class labels in model output order.
pub async fn get_labels(State(state): State<AppState>) -> Json<LabelsResponse> {
    Json(LabelsResponse {
        success: true,
        labels: state.labels.labels().to_vec(),
    })
}
