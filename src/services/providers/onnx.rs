//! ONNX Runtime classifier backend.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ndarray::Array4;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Tensor;

use super::{ClassifierProvider, ProviderError};

/// Classifier backed by an exported ONNX model.
///
/// `Session::run` takes `&mut self`, so the session sits behind a mutex and
/// concurrent requests serialize on the forward pass only.
pub struct OnnxClassifier {
    session: Arc<Mutex<Session>>,
    input_size: u32,
}

impl OnnxClassifier {
    /// Load the model from disk and build a session with full graph
    /// optimization.
    pub fn load(path: impl AsRef<Path>, input_size: u32) -> Result<Self, ProviderError> {
        let session = Session::builder()
            .map_err(|e| ProviderError::ModelLoad(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ProviderError::ModelLoad(e.to_string()))?
            .commit_from_file(path.as_ref())
            .map_err(|e| {
                ProviderError::ModelLoad(format!(
                    "{}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?;

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_size,
        })
    }
}

#[async_trait]
impl ClassifierProvider for OnnxClassifier {
    async fn classify(&self, input: Array4<f32>) -> Result<Vec<f32>, ProviderError> {
        let session = Arc::clone(&self.session);
        let size = self.input_size as usize;
        let data = input.into_raw_vec();

        // ort's run is synchronous; keep it off the async runtime.
        tokio::task::spawn_blocking(move || {
            let tensor = Tensor::from_array(([1, size, size, 3], data))
                .map_err(|e| ProviderError::Inference(e.to_string()))?;

            let mut session = session
                .lock()
                .map_err(|_| ProviderError::Inference("Model session lock poisoned".to_string()))?;
            let outputs = session
                .run(ort::inputs![tensor])
                .map_err(|e| ProviderError::Inference(e.to_string()))?;

            let (_, scores) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| ProviderError::InvalidOutput(e.to_string()))?;

            Ok(scores.to_vec())
        })
        .await
        .map_err(|e| ProviderError::Inference(format!("Inference task failed: {}", e)))?
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        // The session either loaded at startup or this backend was never built.
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "onnx"
    }
}
