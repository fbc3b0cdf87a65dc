//! Model artifact loading
//!
//! Two artifacts are read once at startup: the ONNX classifier and the
//! decision threshold (a JSON float). Either one failing to load is fatal.

use anyhow::{Context, Result};
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::fs;
use std::path::Path;
use tracing::info;

/// Loaded ONNX model with resolved tensor names
pub struct LoadedModel {
    /// ONNX Runtime session
    pub session: Session,
    /// Input name for the model
    pub input_name: String,
    /// Output name for probabilities
    pub output_name: String,
}

/// Loader for the fraud classifier artifact
pub struct ModelLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ModelLoader {
    /// Create a new model loader with default settings (1 thread)
    pub fn new() -> Result<Self> {
        Self::with_threads(1)
    }

    /// Create a new model loader with specified number of threads
    pub fn with_threads(onnx_threads: usize) -> Result<Self> {
        // Initialize ONNX Runtime
        ort::init().commit()?;
        info!(onnx_threads = onnx_threads, "ONNX Runtime initialized");
        Ok(Self { onnx_threads })
    }

    /// Load the classifier from an ONNX file
    pub fn load_model<P: AsRef<Path>>(&self, path: P) -> Result<LoadedModel> {
        let path = path.as_ref();

        info!(path = %path.display(), threads = self.onnx_threads, "Loading ONNX model");

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(self.onnx_threads)?
            .commit_from_file(path)
            .context(format!("Failed to load model from {:?}", path))?;

        // Get input/output names
        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "float_input".to_string());

        let output_name = session
            .outputs
            .iter()
            .find(|o| o.name.contains("prob") || o.name.contains("output"))
            .map(|o| o.name.clone())
            .unwrap_or_else(|| {
                session
                    .outputs
                    .last()
                    .map(|o| o.name.clone())
                    .unwrap_or_else(|| "probabilities".to_string())
            });

        info!(
            input = %input_name,
            output = %output_name,
            "Model loaded successfully"
        );

        Ok(LoadedModel {
            session,
            input_name,
            output_name,
        })
    }
}

/// Load the decision threshold from a JSON artifact containing a bare float.
pub fn load_threshold<P: AsRef<Path>>(path: P) -> Result<f64> {
    let path = path.as_ref();

    let raw = fs::read_to_string(path)
        .context(format!("Failed to read threshold from {:?}", path))?;

    let threshold: f64 = serde_json::from_str(raw.trim())
        .context(format!("Failed to parse threshold from {:?}", path))?;

    anyhow::ensure!(
        threshold.is_finite() && (0.0..=1.0).contains(&threshold),
        "Threshold {} out of range [0, 1]",
        threshold
    );

    info!(threshold = threshold, "Decision threshold loaded");

    Ok(threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_threshold() {
        let path = write_temp("fraud_threshold_ok.json", "0.5\n");
        assert_eq!(load_threshold(&path).unwrap(), 0.5);
    }

    #[test]
    fn test_load_threshold_missing_file() {
        assert!(load_threshold("does/not/exist.json").is_err());
    }

    #[test]
    fn test_load_threshold_rejects_garbage() {
        let path = write_temp("fraud_threshold_bad.json", "not a number");
        assert!(load_threshold(&path).is_err());
    }

    #[test]
    fn test_load_threshold_rejects_out_of_range() {
        let path = write_temp("fraud_threshold_range.json", "1.5");
        assert!(load_threshold(&path).is_err());
    }
}
