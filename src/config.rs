//! Configuration management for the fraud detection API

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port (0 picks a free port, used by the test suite)
    pub port: u16,
}

/// Model artifact configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Path to the ONNX classifier artifact
    #[serde(default = "default_model_path")]
    pub model_path: String,
    /// Path to the decision threshold artifact (JSON float)
    #[serde(default = "default_threshold_path")]
    pub threshold_path: String,
    /// Number of threads for ONNX inference (default: 1)
    #[serde(default = "default_onnx_threads")]
    pub onnx_threads: usize,
}

fn default_model_path() -> String {
    "model/fraud_model.onnx".to_string()
}

fn default_threshold_path() -> String {
    "model/fraud_threshold.json".to_string()
}

fn default_onnx_threads() -> usize {
    1
}

/// Cross-origin configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Origin allowed to call the API with credentials
    pub allowed_origin: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl AppConfig {
    /// Load configuration from the default path, falling back to the
    /// built-in defaults when no config file is present.
    pub fn load() -> Result<Self> {
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::load_from_path(DEFAULT_CONFIG_PATH)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            model: ModelConfig {
                model_path: default_model_path(),
                threshold_path: default_threshold_path(),
                onnx_threads: default_onnx_threads(),
            },
            cors: CorsConfig {
                allowed_origin: "http://localhost:3000".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.model.model_path, "model/fraud_model.onnx");
        assert_eq!(config.model.threshold_path, "model/fraud_threshold.json");
        assert_eq!(config.model.onnx_threads, 1);
        assert_eq!(config.cors.allowed_origin, "http://localhost:3000");
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let result = AppConfig::load_from_path("does/not/exist.toml");
        assert!(result.is_err());
    }
}
