//! Core services: image preprocessing, label mapping, classifier backends,
//! and Prometheus metrics.

pub mod labels;
pub mod metrics;
pub mod preprocess;
pub mod providers;

pub use labels::{LabelError, LabelMap};
pub use metrics::{get_metrics, init_metrics};
pub use preprocess::PreprocessError;
pub use providers::mock::MockClassifier;
pub use providers::onnx::OnnxClassifier;
pub use providers::{ClassifierProvider, ProviderError};
