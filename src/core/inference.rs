//! Model-Backed Scoring Module
//!
//! Optional linear model loaded from a JSON artifact at startup.
//!
//! Pipeline:
//! 1. Encode - kategori -> index di daftar encoder (kategori baru = 0)
//! 2. Scale  - standardisasi (x - mean) / scale
//! 3. Regress - tiga output: success_rate, roi, market_demand
//!
//! Hewan yang direkomendasikan tetap diambil dari rule table. Semua
//! kegagalan di jalur model jatuh kembali ke rule table tanpa error.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::decision::{predict_with_rules, select_animal, Recommender};
use crate::models::config::ServiceConfig;
use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::models::types::{ModelState, Prediction, RecommendationRequest};
use crate::utils::constants::MODEL_OUTPUTS;

// ============================================
// FEATURES
// ============================================

/// Input columns the artifact may reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Region,
    Goal,
    AvailableFeed,
    TimeAvailability,
    Experience,
    LandSize,
}

impl Feature {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "region" => Some(Self::Region),
            "goal" => Some(Self::Goal),
            "available_feed" => Some(Self::AvailableFeed),
            "time_availability" => Some(Self::TimeAvailability),
            "experience" => Some(Self::Experience),
            "land_size" => Some(Self::LandSize),
            _ => None,
        }
    }

    pub fn is_categorical(&self) -> bool {
        !matches!(self, Self::LandSize)
    }

    fn raw_value<'a>(&self, request: &'a RecommendationRequest) -> Option<&'a str> {
        match self {
            Self::Region => Some(request.region.as_str()),
            Self::Goal => Some(request.goal.as_str()),
            Self::AvailableFeed => Some(request.available_feed.as_str()),
            Self::TimeAvailability => Some(request.time_availability.as_str()),
            Self::Experience => Some(request.experience.as_str()),
            Self::LandSize => None,
        }
    }
}

// ============================================
// ARTIFACT
// ============================================

#[derive(Debug, Deserialize)]
struct RawArtifact {
    #[serde(default)]
    version: Option<String>,
    feature_mapping: Vec<String>,
    #[serde(default)]
    encoders: HashMap<String, Vec<String>>,
    scaler: RawScaler,
    model: RawLinearModel,
}

#[derive(Debug, Deserialize)]
struct RawScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct RawLinearModel {
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

/// Validated model artifact: encoders, scaler and linear model
#[derive(Debug, Clone)]
pub struct ModelArtifact {
    pub version: Option<String>,
    features: Vec<Feature>,
    encoders: HashMap<Feature, Vec<String>>,
    mean: Vec<f64>,
    scale: Vec<f64>,
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl ModelArtifact {
    pub fn from_json_str(raw: &str) -> AppResult<Self> {
        let raw: RawArtifact = serde_json::from_str(raw)?;
        Self::from_raw(raw)
    }

    pub fn from_path(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    fn from_raw(raw: RawArtifact) -> AppResult<Self> {
        let n = raw.feature_mapping.len();
        if n == 0 {
            return Err(AppError::model_incompatible("feature_mapping is empty"));
        }

        let mut features = Vec::with_capacity(n);
        for name in &raw.feature_mapping {
            let feature = Feature::from_name(name)
                .ok_or_else(|| AppError::model_incompatible(format!("Unknown feature: {}", name)))?;
            if features.contains(&feature) {
                return Err(AppError::model_incompatible(format!("Duplicate feature: {}", name)));
            }
            features.push(feature);
        }

        let mut encoders = HashMap::new();
        for (name, feature) in raw.feature_mapping.iter().zip(&features) {
            if !feature.is_categorical() {
                continue;
            }
            let categories = raw
                .encoders
                .get(name)
                .ok_or_else(|| AppError::model_incompatible(format!("Missing encoder for {}", name)))?;
            encoders.insert(*feature, categories.clone());
        }

        if raw.scaler.mean.len() != n || raw.scaler.scale.len() != n {
            return Err(AppError::model_incompatible(format!(
                "Scaler expects {} features, mapping has {}",
                raw.scaler.mean.len().max(raw.scaler.scale.len()),
                n
            )));
        }
        if raw.model.coefficients.len() != MODEL_OUTPUTS || raw.model.intercepts.len() != MODEL_OUTPUTS {
            return Err(AppError::model_incompatible(format!(
                "Model must have {} outputs",
                MODEL_OUTPUTS
            )));
        }
        if let Some(row) = raw.model.coefficients.iter().find(|row| row.len() != n) {
            return Err(AppError::model_incompatible(format!(
                "Coefficient row has {} weights, expected {}",
                row.len(),
                n
            )));
        }

        Ok(Self {
            version: raw.version,
            features,
            encoders,
            mean: raw.scaler.mean,
            scale: raw.scaler.scale,
            coefficients: raw.model.coefficients,
            intercepts: raw.model.intercepts,
        })
    }

    /// Category index, or 0 for unseen categories
    fn encode(&self, feature: Feature, request: &RecommendationRequest) -> f64 {
        match feature.raw_value(request) {
            Some(value) => self
                .encoders
                .get(&feature)
                .and_then(|cats| cats.iter().position(|c| c == value))
                .unwrap_or(0) as f64,
            None => request.land_size,
        }
    }

    /// Feature vector in `feature_mapping` order, standardized
    pub fn transform(&self, request: &RecommendationRequest) -> Vec<f64> {
        self.features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(feature, (mean, scale))| {
                // sklearn treats a zero scale as 1
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (self.encode(*feature, request) - mean) / scale
            })
            .collect()
    }

    /// Raw model outputs: [success_rate, roi, market_demand]
    pub fn infer(&self, request: &RecommendationRequest) -> AppResult<[f64; MODEL_OUTPUTS]> {
        let x = self.transform(request);
        let mut out = [0.0; MODEL_OUTPUTS];
        for (slot, (row, intercept)) in out.iter_mut().zip(self.coefficients.iter().zip(&self.intercepts)) {
            *slot = intercept + row.iter().zip(&x).map(|(w, v)| w * v).sum::<f64>();
        }
        if out.iter().any(|v| !v.is_finite()) {
            return Err(AppError::inference_failed(format!("Non-finite model output: {:?}", out)));
        }
        Ok(out)
    }
}

// ============================================
// STRATEGY
// ============================================

/// Scores from the model, animal from the rule table, rules on any failure
pub struct ModelBackedRecommender {
    artifact: ModelArtifact,
}

impl ModelBackedRecommender {
    pub fn new(artifact: ModelArtifact) -> Self {
        Self { artifact }
    }

    pub fn predict(&self, request: &RecommendationRequest) -> AppResult<Prediction> {
        let [success_rate, roi, market_demand] = self.artifact.infer(request)?;
        let (animal, _) = select_animal(request.goal(), request.land_size);

        // The model never picks the animal; its raw roi/demand are only logged
        debug!(
            animal = %animal,
            success_rate,
            raw_roi = roi,
            raw_market_demand = market_demand,
            "Model scores paired with rule-table animal"
        );

        Ok(Prediction::from_success_rate(animal, success_rate))
    }
}

impl Recommender for ModelBackedRecommender {
    fn name(&self) -> &'static str {
        "ml_model"
    }

    fn recommend(&self, request: &RecommendationRequest) -> Prediction {
        match self.predict(request) {
            Ok(prediction) => prediction,
            Err(e) => {
                warn!(code = e.code_str(), "⚠️  Prediction error, using rule-based fallback: {}", e.detail());
                predict_with_rules(request)
            }
        }
    }
}

// ============================================
// STARTUP LOADING
// ============================================

/// First candidate path that exists on disk
pub fn find_model_path(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|p| p.exists()).cloned()
}

/// Load the artifact once, bounded by the configured timeout. Never fails:
/// every problem is recorded in the returned `ModelState`.
pub async fn load_model(config: &ServiceConfig) -> (ModelState, Option<ModelArtifact>) {
    match try_load_model(config).await {
        Ok(artifact) => {
            info!(
                version = artifact.version.as_deref().unwrap_or("unversioned"),
                "✅ Model loaded successfully!"
            );
            (ModelState::loaded(), Some(artifact))
        }
        Err(e) => {
            warn!(code = e.code_str(), "⚠️  {}, using rule-based fallback", e.detail());
            (ModelState::failed(e.detail()), None)
        }
    }
}

async fn try_load_model(config: &ServiceConfig) -> AppResult<ModelArtifact> {
    let path = find_model_path(&config.model_candidates()).ok_or_else(AppError::model_not_found)?;
    info!("📦 Loading model from: {}", path.display());

    let budget = config.model_load_timeout;
    let task = tokio::task::spawn_blocking(move || ModelArtifact::from_path(&path));

    match tokio::time::timeout(budget, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(AppError::new(
            ErrorCode::ModelLoadFailed,
            format!("Model loader task failed: {}", join_err),
        )),
        Err(_) => Err(AppError::model_timeout(budget)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::AnimalKey;
    use serde_json::json;
    use std::time::Duration;

    fn request(goal: &str, land_size: f64, experience: &str) -> RecommendationRequest {
        RecommendationRequest {
            region: "jawa_barat".to_string(),
            land_size,
            goal: goal.to_string(),
            available_feed: "rumput".to_string(),
            time_availability: "penuh".to_string(),
            experience: experience.to_string(),
        }
    }

    fn artifact_json(experience_weight: f64, land_weight: f64) -> serde_json::Value {
        json!({
            "version": "test-1",
            "feature_mapping": ["region", "goal", "available_feed", "time_availability", "experience", "land_size"],
            "encoders": {
                "region": ["jawa_barat", "jawa_timur"],
                "goal": ["daging", "telur", "susu"],
                "available_feed": ["rumput", "dedak"],
                "time_availability": ["penuh", "paruh_waktu"],
                "experience": ["pemula", "menengah", "ahli"]
            },
            "scaler": { "mean": [0.0, 0.0, 0.0, 0.0, 0.0, 0.0], "scale": [1.0, 1.0, 1.0, 1.0, 1.0, 1.0] },
            "model": {
                "coefficients": [
                    [0.0, 0.0, 0.0, 0.0, experience_weight, land_weight],
                    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
                ],
                "intercepts": [0.5, 0.2, 0.9]
            }
        })
    }

    fn artifact(experience_weight: f64, land_weight: f64) -> ModelArtifact {
        ModelArtifact::from_json_str(&artifact_json(experience_weight, land_weight).to_string()).unwrap()
    }

    #[test]
    fn test_encoding_and_unseen_category() {
        let model = artifact(0.1, 0.0);
        let ahli = model.transform(&request("telur", 10.0, "ahli"));
        assert_eq!(ahli, vec![0.0, 1.0, 0.0, 0.0, 2.0, 10.0]);

        let mut unseen = request("kelinci", 10.0, "guru");
        unseen.region = "papua".to_string();
        assert_eq!(model.transform(&unseen), vec![0.0, 0.0, 0.0, 0.0, 0.0, 10.0]);
    }

    #[test]
    fn test_scaler_applied_and_zero_scale_ignored() {
        let mut raw = artifact_json(0.0, 0.0);
        raw["scaler"]["mean"] = json!([0.0, 0.0, 0.0, 0.0, 1.0, 100.0]);
        raw["scaler"]["scale"] = json!([0.0, 1.0, 1.0, 1.0, 1.0, 50.0]);
        let model = ModelArtifact::from_json_str(&raw.to_string()).unwrap();

        let x = model.transform(&request("daging", 200.0, "ahli"));
        assert_eq!(x, vec![0.0, 0.0, 0.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_model_scores_with_rule_animal() {
        let recommender = ModelBackedRecommender::new(artifact(0.1, 0.0));
        let p = recommender.recommend(&request("daging", 150.0, "ahli"));

        // animal comes from the rule table, success_rate from the model
        assert_eq!(p.recommended_animal, AnimalKey::Kambing);
        assert!((p.success_rate - 0.7).abs() < 1e-9);
        assert!((p.roi - 0.28).abs() < 1e-9);
        assert!((p.market_demand - 0.94).abs() < 1e-9);
    }

    #[test]
    fn test_model_output_clamped() {
        let recommender = ModelBackedRecommender::new(artifact(0.0, 1.0));
        let p = recommender.recommend(&request("susu", 500.0, "pemula"));
        assert_eq!(p.recommended_animal, AnimalKey::SapiPerah);
        assert_eq!(p.success_rate, 1.0);
    }

    #[test]
    fn test_non_finite_output_falls_back_to_rules() {
        let recommender = ModelBackedRecommender::new(artifact(0.0, 1e300));
        let req = request("daging", 1e300, "menengah");

        let err = recommender.predict(&req).unwrap_err();
        assert_eq!(err.code, ErrorCode::ModelInferenceFailed);
        assert_eq!(recommender.recommend(&req), predict_with_rules(&req));
    }

    #[test]
    fn test_rejects_incompatible_artifacts() {
        let mut unknown = artifact_json(0.0, 0.0);
        unknown["feature_mapping"][0] = json!("rainfall");
        let err = ModelArtifact::from_json_str(&unknown.to_string()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ModelIncompatible);

        let mut short_scaler = artifact_json(0.0, 0.0);
        short_scaler["scaler"]["mean"] = json!([0.0, 0.0]);
        let err = ModelArtifact::from_json_str(&short_scaler.to_string()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ModelIncompatible);

        let mut two_outputs = artifact_json(0.0, 0.0);
        two_outputs["model"]["intercepts"] = json!([0.5, 0.2]);
        let err = ModelArtifact::from_json_str(&two_outputs.to_string()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ModelIncompatible);

        let mut no_encoder = artifact_json(0.0, 0.0);
        no_encoder["encoders"].as_object_mut().unwrap().remove("goal");
        let err = ModelArtifact::from_json_str(&no_encoder.to_string()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ModelIncompatible);

        let err = ModelArtifact::from_json_str("not json").unwrap_err();
        assert_eq!(err.code, ErrorCode::ModelLoadFailed);
    }

    #[test]
    fn test_out_of_range_number_rejected() {
        let mut raw = artifact_json(0.1, 0.0).to_string();
        raw = raw.replacen("\"intercepts\":[", "\"intercepts\":[1e400,", 1);
        let err = ModelArtifact::from_json_str(&raw).unwrap_err();
        assert_eq!(err.code, ErrorCode::ModelLoadFailed);
    }

    #[tokio::test]
    async fn test_load_model_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServiceConfig {
            model_path: Some(dir.path().join("absent.json")),
            ..ServiceConfig::default()
        };

        let (state, artifact) = load_model(&config).await;
        assert!(!state.loaded);
        assert_eq!(state.error.as_deref(), Some("Model file not found"));
        assert!(artifact.is_none());
    }

    #[tokio::test]
    async fn test_load_model_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, artifact_json(0.1, 0.0).to_string()).unwrap();

        let config = ServiceConfig {
            model_path: Some(path),
            model_load_timeout: Duration::from_secs(5),
            ..ServiceConfig::default()
        };

        let (state, artifact) = load_model(&config).await;
        assert_eq!(state, ModelState::loaded());
        assert_eq!(artifact.unwrap().version.as_deref(), Some("test-1"));
    }

    #[tokio::test]
    async fn test_load_model_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "{\"feature_mapping\": [").unwrap();

        let config = ServiceConfig {
            model_path: Some(path),
            ..ServiceConfig::default()
        };

        let (state, artifact) = load_model(&config).await;
        assert!(!state.loaded);
        assert!(state.error.unwrap().starts_with("JSON parse error"));
        assert!(artifact.is_none());
    }

    #[cfg(unix)]
    #[tokio::test(flavor = "multi_thread")]
    async fn test_load_model_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        // Pembaca FIFO tanpa penulis akan blok sampai ada yang membuka sisi tulis
        let status = std::process::Command::new("mkfifo").arg(&path).status().unwrap();
        assert!(status.success());

        let config = ServiceConfig {
            model_path: Some(path.clone()),
            model_load_timeout: Duration::from_millis(300),
            ..ServiceConfig::default()
        };

        let (state, artifact) = load_model(&config).await;
        assert!(!state.loaded);
        assert_eq!(state.error.as_deref(), Some("Model load timed out after 300ms"));
        assert!(artifact.is_none());

        // Release the blocked loader thread
        drop(std::fs::OpenOptions::new().write(true).open(&path).unwrap());
    }
}
