use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

/// Default model input edge length in pixels (MobileNetV2 export).
const DEFAULT_INPUT_SIZE: u32 = 224;

/// Default number of ranked predictions returned alongside the top label.
const DEFAULT_TOP_K: usize = 5;

/// Default upper bound on images per batch request.
const DEFAULT_MAX_BATCH_SIZE: usize = 32;

/// Common settings shared with infrastructure tooling (port comes from
/// `configuration.*` files or `APP__`-prefixed environment variables).
#[derive(Debug, Deserialize, Clone)]
pub struct CommonConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl CommonConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[derive(Debug, Clone)]
pub struct RecognitionConfig {
    pub common: CommonConfig,
    pub model: ModelConfig,
    pub labels: LabelsConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Whether to load the ONNX model; disabled falls back to the mock backend.
    pub enabled: bool,
    /// Path to the exported ONNX classifier (e.g., asl_mobilenetv2.onnx).
    pub path: String,
    /// Square input edge length the model expects.
    pub input_size: u32,
    /// Ranked predictions to include in responses.
    pub top_k: usize,
    /// Maximum images accepted per batch request.
    pub max_batch_size: usize,
}

#[derive(Debug, Clone)]
pub struct LabelsConfig {
    /// Optional JSON file (array of strings) overriding the built-in label set.
    pub path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

impl RecognitionConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = CommonConfig::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(RecognitionConfig {
            common,
            model: ModelConfig {
                enabled: get_env("MODEL_ENABLED", Some("true"), is_prod)?
                    .parse()
                    .unwrap_or(true),
                path: get_env("MODEL_PATH", Some("models/asl_mobilenetv2.onnx"), is_prod)?,
                input_size: get_env(
                    "MODEL_INPUT_SIZE",
                    Some(&DEFAULT_INPUT_SIZE.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_INPUT_SIZE),
                top_k: get_env("MODEL_TOP_K", Some(&DEFAULT_TOP_K.to_string()), is_prod)?
                    .parse()
                    .unwrap_or(DEFAULT_TOP_K),
                max_batch_size: get_env(
                    "MODEL_MAX_BATCH_SIZE",
                    Some(&DEFAULT_MAX_BATCH_SIZE.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_MAX_BATCH_SIZE),
            },
            labels: LabelsConfig {
                path: env::var("LABELS_PATH").ok(),
            },
            security: SecurityConfig {
                allowed_origins: get_env("ALLOWED_ORIGINS", Some("http://localhost:3000"), is_prod)?
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect(),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_env_falls_back_to_default_outside_prod() {
        let value = get_env("RECOGNITION_TEST_UNSET_KEY", Some("fallback"), false).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn get_env_requires_key_in_prod() {
        let result = get_env("RECOGNITION_TEST_UNSET_KEY", Some("fallback"), true);
        assert!(result.is_err());
    }
}
