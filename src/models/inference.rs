//! Fraud classifier inference

use crate::config::AppConfig;
use crate::feature_extractor::FeatureExtractor;
use crate::models::loader::{self, LoadedModel, ModelLoader};
use crate::types::prediction::PredictionResult;
use crate::types::transaction::Transaction;
use anyhow::{Context, Result};
use ort::memory::Allocator;
use ort::value::{DowncastableTarget, DynMapValueType, DynSequenceValueType};
use std::sync::RwLock;
use tracing::{debug, info};

/// Source of fraud probabilities for a feature vector.
///
/// Implemented by the ONNX-backed scorer in production and by stubs in
/// the test suite.
pub trait FraudScorer: Send + Sync {
    /// Return the probability of the fraud class for the given features.
    fn score(&self, features: &[f32]) -> Result<f64>;
}

/// ONNX-backed fraud scorer.
pub struct OnnxScorer {
    /// Loaded model (session execution requires exclusive access)
    model: RwLock<LoadedModel>,
}

impl OnnxScorer {
    /// Wrap an already-loaded model.
    pub fn new(model: LoadedModel) -> Self {
        Self {
            model: RwLock::new(model),
        }
    }

    /// Load the classifier artifact from disk.
    pub fn load(path: &str, onnx_threads: usize) -> Result<Self> {
        let loader = ModelLoader::with_threads(onnx_threads)?;
        Ok(Self::new(loader.load_model(path)?))
    }
}

impl FraudScorer for OnnxScorer {
    fn score(&self, features: &[f32]) -> Result<f64> {
        use ort::value::Tensor;

        let mut guard = self
            .model
            .write()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;
        let model = &mut *guard;

        // Prepare input tensor - shape [1, num_features]
        let shape = vec![1_i64, features.len() as i64];
        let input_tensor = Tensor::from_array((shape, features.to_vec()))
            .context("Failed to create input tensor")?;

        let outputs = model
            .session
            .run(ort::inputs![&model.input_name => input_tensor])?;

        extract_probability(&outputs, &model.output_name)
    }
}

/// Extract the fraud-class probability from model output.
///
/// Handles both tensor outputs and the seq(map) output emitted by
/// sklearn-family ONNX converters.
fn extract_probability(
    outputs: &ort::session::SessionOutputs,
    output_name: &str,
) -> Result<f64> {
    // First, try the probabilities output by name
    if let Some(output) = outputs.get(output_name) {
        let dtype = output.dtype();

        // Tensor format: [batch, num_classes]
        if let Ok(tensor) = output.try_extract_tensor::<f32>() {
            let (shape, data) = tensor;
            let prob = fraud_prob_from_tensor(&shape, data)?;
            debug!(prob = prob, "Extracted from tensor");
            return Ok(prob);
        }

        // Sequence format: seq(map(int64, float))
        if DynSequenceValueType::can_downcast(&dtype) {
            if let Ok(prob) = extract_from_sequence_map(output) {
                return Ok(prob);
            }
        }
    }

    // Fallback: iterate all outputs and try extraction
    for (name, output) in outputs.iter() {
        // Skip "label" output
        if name.contains("label") {
            continue;
        }

        let dtype = output.dtype();

        if let Ok(tensor) = output.try_extract_tensor::<f32>() {
            let (shape, data) = tensor;
            let prob = fraud_prob_from_tensor(&shape, data)?;
            debug!(output = %name, prob = prob, "Extracted from tensor (fallback)");
            return Ok(prob);
        }

        if DynSequenceValueType::can_downcast(&dtype) {
            if let Ok(prob) = extract_from_sequence_map(&output) {
                return Ok(prob);
            }
        }
    }

    Err(anyhow::anyhow!(
        "No probability output found in model results"
    ))
}

/// Extract probability from seq(map(int64, float)) format.
fn extract_from_sequence_map(output: &ort::value::DynValue) -> Result<f64> {
    let allocator = Allocator::default();

    let sequence = output
        .downcast_ref::<DynSequenceValueType>()
        .map_err(|e| anyhow::anyhow!("Failed to downcast to sequence: {}", e))?;

    let maps = sequence.try_extract_sequence::<DynMapValueType>(&allocator)?;

    if maps.is_empty() {
        return Err(anyhow::anyhow!("Empty sequence"));
    }

    // Batch size is always 1, so only the first map matters
    let map_value = &maps[0];
    let kv_pairs = map_value.try_extract_key_values::<i64, f32>()?;

    // Class 1 is the fraud class
    for (class_id, prob) in &kv_pairs {
        if *class_id == 1 {
            debug!(prob = *prob, "Extracted from seq(map)");
            return Ok(*prob as f64);
        }
    }

    for (class_id, prob) in &kv_pairs {
        if *class_id == 0 {
            return Ok(1.0 - *prob as f64);
        }
    }

    Err(anyhow::anyhow!("No probability found in map"))
}

/// Extract fraud probability from tensor data.
fn fraud_prob_from_tensor(shape: &ort::tensor::Shape, data: &[f32]) -> Result<f64> {
    let dims: Vec<i64> = shape.iter().copied().collect();

    if dims.len() == 2 {
        let num_classes = dims[1] as usize;
        if num_classes >= 2 {
            // [batch, num_classes] - fraud class is index 1
            return Ok(data[1] as f64);
        } else if num_classes == 1 {
            // [batch, 1] - single probability
            return Ok(data[0] as f64);
        }
    } else if dims.len() == 1 {
        let num_classes = dims[0] as usize;
        if num_classes >= 2 {
            return Ok(data[1] as f64);
        } else if num_classes == 1 {
            return Ok(data[0] as f64);
        }
    }

    Err(anyhow::anyhow!(
        "Unexpected output tensor shape {:?}",
        dims
    ))
}

/// Prediction service combining the feature extractor, the scorer, and
/// the decision threshold loaded at startup.
///
/// Immutable after construction; shared read-only across requests.
pub struct PredictionService {
    extractor: FeatureExtractor,
    scorer: Box<dyn FraudScorer>,
    threshold: f64,
}

impl PredictionService {
    /// Create a service from a scorer and a decision threshold.
    pub fn new(scorer: Box<dyn FraudScorer>, threshold: f64) -> Self {
        Self {
            extractor: FeatureExtractor::new(),
            scorer,
            threshold,
        }
    }

    /// Load both model artifacts per the configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let scorer = OnnxScorer::load(&config.model.model_path, config.model.onnx_threads)?;
        let threshold = loader::load_threshold(&config.model.threshold_path)?;

        info!(
            model = %config.model.model_path,
            threshold = threshold,
            "Prediction service initialized"
        );

        Ok(Self::new(Box::new(scorer), threshold))
    }

    /// The decision threshold loaded at startup.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score a transaction and derive the thresholded decision.
    pub fn predict(&self, transaction: &Transaction) -> Result<PredictionResult> {
        let features = self.extractor.extract(transaction);
        let probability = self.scorer.score(&features)?;

        debug!(
            probability = probability,
            threshold = self.threshold,
            "Transaction scored"
        );

        Ok(PredictionResult::from_probability(
            probability,
            self.threshold,
        ))
    }
}
