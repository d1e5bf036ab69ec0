//! Classifier backend abstractions and implementations.
//!
//! A trait-based seam over the inference runtime so the service can swap
//! between the ONNX Runtime backend and a mock (tests, model-less runs).

pub mod mock;
pub mod onnx;

use async_trait::async_trait;
use ndarray::Array4;
use thiserror::Error;

/// Error type for classifier backends.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Backend not configured: {0}")]
    NotConfigured(String),

    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Model produced invalid output: {0}")]
    InvalidOutput(String),
}

/// Trait for classification backends.
#[async_trait]
pub trait ClassifierProvider: Send + Sync {
    /// Run a single forward pass over a preprocessed `[1, H, W, 3]` tensor
    /// and return the per-class probability vector.
    async fn classify(&self, input: Array4<f32>) -> Result<Vec<f32>, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;

    /// Short backend identifier for health reporting.
    fn backend(&self) -> &'static str;
}
