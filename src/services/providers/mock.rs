//! Mock classifier backend for tests and model-less runs.

use async_trait::async_trait;
use ndarray::Array4;

use super::{ClassifierProvider, ProviderError};

/// Deterministic classifier: class 0 always scores highest, with a strictly
/// decreasing distribution that sums to 1.
pub struct MockClassifier {
    num_classes: usize,
}

impl MockClassifier {
    pub fn new(num_classes: usize) -> Self {
        Self { num_classes }
    }
}

#[async_trait]
impl ClassifierProvider for MockClassifier {
    async fn classify(&self, _input: Array4<f32>) -> Result<Vec<f32>, ProviderError> {
        if self.num_classes == 0 {
            return Err(ProviderError::NotConfigured(
                "Mock classifier has no classes".to_string(),
            ));
        }

        let total: f32 = (1..=self.num_classes).map(|w| w as f32).sum();
        let scores = (0..self.num_classes)
            .map(|i| (self.num_classes - i) as f32 / total)
            .collect();

        Ok(scores)
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.num_classes > 0 {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Mock classifier has no classes".to_string(),
            ))
        }
    }

    fn backend(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::labels::LabelMap;

    #[tokio::test]
    async fn mock_scores_are_a_distribution_peaked_at_zero() {
        let classifier = MockClassifier::new(29);
        let input = Array4::<f32>::zeros((1, 4, 4, 3));

        let scores = classifier.classify(input).await.unwrap();
        assert_eq!(scores.len(), 29);
        assert_eq!(LabelMap::argmax(&scores), Some(0));

        let sum: f32 = scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-4);
    }

    #[tokio::test]
    async fn empty_mock_fails_health_check() {
        let classifier = MockClassifier::new(0);
        assert!(classifier.health_check().await.is_err());
    }
}
