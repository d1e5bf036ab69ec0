//! Application startup and lifecycle management.
//!
//! Builds the shared state (classifier backend, label map), binds the HTTP
//! listener, and serves the router until stopped.

use crate::config::RecognitionConfig;
use crate::error::AppError;
use crate::services::{ClassifierProvider, LabelMap, MockClassifier, OnnxClassifier};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: RecognitionConfig,
    pub classifier: Arc<dyn ClassifierProvider>,
    pub labels: Arc<LabelMap>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: RecognitionConfig) -> Result<Self, AppError> {
        // Load label map
        let labels = match &config.labels.path {
            Some(path) => Arc::new(LabelMap::from_file(path).map_err(|e| {
                tracing::error!("Failed to load labels from {}: {}", path, e);
                AppError::ConfigError(anyhow::Error::new(e))
            })?),
            None => Arc::new(LabelMap::asl_default()),
        };
        tracing::info!(classes = labels.len(), "Label map loaded");

        // Select classifier backend
        let classifier: Arc<dyn ClassifierProvider> = if config.model.enabled {
            match OnnxClassifier::load(&config.model.path, config.model.input_size) {
                Ok(provider) => {
                    tracing::info!(
                        model_path = %config.model.path,
                        input_size = config.model.input_size,
                        "ONNX classifier initialized"
                    );
                    Arc::new(provider)
                }
                Err(e) => {
                    tracing::warn!("Failed to load ONNX model: {}. Using mock.", e);
                    Arc::new(MockClassifier::new(labels.len()))
                }
            }
        } else {
            tracing::info!("Model disabled, using mock classifier");
            Arc::new(MockClassifier::new(labels.len()))
        };

        let state = AppState {
            config: config.clone(),
            classifier,
            labels,
        };

        // Bind HTTP listener (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Recognition service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = crate::app_router(self.state);
        axum::serve(self.listener, router).await
    }
}
