//! HTTP handlers for recognition-service.

pub mod health;
pub mod labels;
pub mod predict;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use labels::get_labels;
pub use predict::{predict, predict_batch};
