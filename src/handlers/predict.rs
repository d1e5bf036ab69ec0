use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use validator::Validate;

use crate::error::AppError;
use crate::services::preprocess::{self, PreprocessError};
use crate::services::{ProviderError, metrics};
use crate::startup::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(length(min = 1, message = "Image payload cannot be empty"))]
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct LabelScore {
    pub label: String,
    pub confidence: f32,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub success: bool,
    pub prediction: String,
    pub confidence: f32,
    pub top_predictions: Vec<LabelScore>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PredictBatchRequest {
    #[validate(length(min = 1, message = "At least one image is required"))]
    pub images: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchResult {
    pub prediction: Option<String>,
    pub confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictBatchResponse {
    pub success: bool,
    pub results: Vec<BatchResult>,
}

fn preprocess_error_kind(err: &PreprocessError) -> &'static str {
    match err {
        PreprocessError::EmptyPayload => "empty_payload",
        PreprocessError::InvalidBase64(_) => "invalid_base64",
        PreprocessError::UndecodableImage(_) => "undecodable_image",
    }
}

/// Run one image through the classifier, returning the ranked labels.
async fn classify_image(state: &AppState, payload: &str) -> Result<Vec<(String, f32)>, AppError> {
    let tensor = preprocess::prepare_input(payload, state.config.model.input_size).map_err(|e| {
        metrics::record_preprocess_error(preprocess_error_kind(&e));
        AppError::from(e)
    })?;

    let started = Instant::now();
    let scores = state.classifier.classify(tensor).await?;
    metrics::record_inference_latency(
        state.classifier.backend(),
        started.elapsed().as_secs_f64(),
    );

    if scores.len() != state.labels.len() {
        return Err(AppError::from(ProviderError::InvalidOutput(format!(
            "Model returned {} scores for {} labels",
            scores.len(),
            state.labels.len()
        ))));
    }

    Ok(state.labels.top_k(&scores, state.config.model.top_k.max(1)))
}

#[tracing::instrument(skip(state, request))]
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<(StatusCode, Json<PredictResponse>), AppError> {
    request.validate()?;

    let ranked = match classify_image(&state, &request.image).await {
        Ok(ranked) => ranked,
        Err(e) => {
            let outcome = match &e {
                AppError::BadRequest(_) | AppError::ValidationError(_) => "bad_input",
                _ => "error",
            };
            metrics::record_predict_request("predict", outcome);
            return Err(e);
        }
    };

    let (prediction, confidence) = ranked
        .first()
        .cloned()
        .ok_or_else(|| AppError::InferenceError(anyhow::anyhow!("Model returned no scores")))?;

    metrics::record_prediction(&prediction);
    metrics::record_predict_request("predict", "ok");

    tracing::info!(
        prediction = %prediction,
        confidence = confidence,
        "Prediction complete"
    );

    Ok((
        StatusCode::OK,
        Json(PredictResponse {
            success: true,
            prediction,
            confidence,
            top_predictions: ranked
                .into_iter()
                .map(|(label, confidence)| LabelScore { label, confidence })
                .collect(),
        }),
    ))
}

#[tracing::instrument(skip(state, request))]
pub async fn predict_batch(
    State(state): State<AppState>,
    Json(request): Json<PredictBatchRequest>,
) -> Result<(StatusCode, Json<PredictBatchResponse>), AppError> {
    request.validate()?;

    let max_batch = state.config.model.max_batch_size;
    if request.images.len() > max_batch {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Batch size {} exceeds the maximum of {}",
            request.images.len(),
            max_batch
        )));
    }

    // One result per input; a failed image yields an error entry instead of
    // failing the whole batch.
    let mut results = Vec::with_capacity(request.images.len());
    for payload in &request.images {
        match classify_image(&state, payload).await {
            Ok(ranked) => match ranked.first().cloned() {
                Some((prediction, confidence)) => {
                    metrics::record_prediction(&prediction);
                    results.push(BatchResult {
                        prediction: Some(prediction),
                        confidence,
                        error: None,
                    });
                }
                None => results.push(BatchResult {
                    prediction: None,
                    confidence: 0.0,
                    error: Some("Model returned no scores".to_string()),
                }),
            },
            Err(e) => {
                results.push(BatchResult {
                    prediction: None,
                    confidence: 0.0,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    metrics::record_predict_request("predict_batch", "ok");

    Ok((
        StatusCode::OK,
        Json(PredictBatchResponse {
            success: true,
            results,
        }),
    ))
}
