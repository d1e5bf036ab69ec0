//! Class-index to label mapping and score ranking.

use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("Failed to read labels file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse labels file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Labels file contains no labels")]
    Empty,
}

/// Ordered mapping from model output index to class label.
#[derive(Debug, Clone)]
pub struct LabelMap {
    labels: Vec<String>,
}

impl LabelMap {
    /// The 29 classes of the ASL alphabet export: `A`..`Z` plus the `del`,
    /// `nothing`, and `space` gestures.
    pub fn asl_default() -> Self {
        let mut labels: Vec<String> = (b'A'..=b'Z').map(|c| (c as char).to_string()).collect();
        labels.push("del".to_string());
        labels.push("nothing".to_string());
        labels.push("space".to_string());
        Self { labels }
    }

    /// Load labels from a JSON file containing an array of strings, ordered
    /// by model output index.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LabelError> {
        let contents = fs::read_to_string(path)?;
        let labels: Vec<String> = serde_json::from_str(&contents)?;
        if labels.is_empty() {
            return Err(LabelError::Empty);
        }
        Ok(Self { labels })
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Index of the highest score; the first occurrence wins on ties.
    pub fn argmax(scores: &[f32]) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, &score) in scores.iter().enumerate() {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((i, score)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// The `k` highest-scoring labels in descending order. Ties keep the
    /// lower index first; `k` is clamped to the label count.
    pub fn top_k(&self, scores: &[f32], k: usize) -> Vec<(String, f32)> {
        let n = scores.len().min(self.labels.len());
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

        indices
            .into_iter()
            .take(k)
            .map(|i| (self.labels[i].clone(), scores[i]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_map_covers_asl_alphabet() {
        let map = LabelMap::asl_default();
        assert_eq!(map.len(), 29);
        assert_eq!(map.get(0), Some("A"));
        assert_eq!(map.get(25), Some("Z"));
        assert_eq!(map.get(26), Some("del"));
        assert_eq!(map.get(27), Some("nothing"));
        assert_eq!(map.get(28), Some("space"));
        assert_eq!(map.get(29), None);
    }

    #[test]
    fn argmax_picks_highest_score() {
        assert_eq!(LabelMap::argmax(&[0.1, 0.7, 0.2]), Some(1));
    }

    #[test]
    fn argmax_prefers_first_on_tie() {
        assert_eq!(LabelMap::argmax(&[0.4, 0.4, 0.2]), Some(0));
    }

    #[test]
    fn argmax_of_empty_is_none() {
        assert_eq!(LabelMap::argmax(&[]), None);
    }

    #[test]
    fn top_k_orders_by_descending_score() {
        let map = LabelMap::asl_default();
        let mut scores = vec![0.0f32; 29];
        scores[2] = 0.5; // C
        scores[0] = 0.3; // A
        scores[25] = 0.2; // Z

        let top = map.top_k(&scores, 3);
        assert_eq!(top[0].0, "C");
        assert_eq!(top[1].0, "A");
        assert_eq!(top[2].0, "Z");
    }

    #[test]
    fn top_k_keeps_lower_index_first_on_ties() {
        let map = LabelMap::asl_default();
        let mut scores = vec![0.0f32; 29];
        scores[3] = 0.5;
        scores[7] = 0.5;

        let top = map.top_k(&scores, 2);
        assert_eq!(top[0].0, "D");
        assert_eq!(top[1].0, "H");
    }

    #[test]
    fn top_k_clamps_to_label_count() {
        let map = LabelMap::asl_default();
        let scores = vec![0.1f32; 29];

        let top = map.top_k(&scores, 100);
        assert_eq!(top.len(), 29);
    }
}
