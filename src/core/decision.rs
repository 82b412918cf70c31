//! Decision Engine
//!
//! Maps a farmer's conditions to a recommended animal plus scores.
//!
//! Rule table:
//! - daging: lahan <100m² ayam pedaging, <200m² kambing, selebihnya sapi potong
//! - telur: ayam petelur
//! - susu: sapi perah
//! - lainnya: ayam pedaging
//!
//! Base score dikali multiplier pengalaman (pemula 0.8, menengah 0.9, ahli 1.0).
//! ROI dan market demand selalu diturunkan dari success rate.

use std::sync::Arc;
use tracing::debug;

use super::inference::{ModelArtifact, ModelBackedRecommender};
use crate::models::types::{AnimalKey, Goal, Prediction, RecommendationRequest};
use crate::utils::constants::{
    BASE_AYAM_PEDAGING, BASE_AYAM_PETELUR, BASE_KAMBING, BASE_OTHER_GOAL, BASE_SAPI_PERAH,
    BASE_SAPI_POTONG, LAND_MEDIUM_LIMIT, LAND_SMALL_LIMIT,
};

/// A scoring strategy. Implementations must be total: no error escapes `recommend`.
pub trait Recommender: Send + Sync {
    fn name(&self) -> &'static str;
    fn recommend(&self, request: &RecommendationRequest) -> Prediction;
}

// ============================================
// RULE TABLE
// ============================================

/// Animal and base score before the experience multiplier
pub fn select_animal(goal: Goal, land_size: f64) -> (AnimalKey, f64) {
    match goal {
        Goal::Daging if land_size < LAND_SMALL_LIMIT => (AnimalKey::AyamPedaging, BASE_AYAM_PEDAGING),
        Goal::Daging if land_size < LAND_MEDIUM_LIMIT => (AnimalKey::Kambing, BASE_KAMBING),
        Goal::Daging => (AnimalKey::SapiPotong, BASE_SAPI_POTONG),
        Goal::Telur => (AnimalKey::AyamPetelur, BASE_AYAM_PETELUR),
        Goal::Susu => (AnimalKey::SapiPerah, BASE_SAPI_PERAH),
        Goal::Other => (AnimalKey::AyamPedaging, BASE_OTHER_GOAL),
    }
}

/// Deterministic rule-based prediction
pub fn predict_with_rules(request: &RecommendationRequest) -> Prediction {
    let (animal, base) = select_animal(request.goal(), request.land_size);
    let multiplier = request.experience().multiplier();
    Prediction::from_success_rate(animal, base * multiplier)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedRecommender;

impl Recommender for RuleBasedRecommender {
    fn name(&self) -> &'static str {
        "rule_based"
    }

    fn recommend(&self, request: &RecommendationRequest) -> Prediction {
        predict_with_rules(request)
    }
}

// ============================================
// ENGINE
// ============================================

/// Strategy holder chosen once at startup
#[derive(Clone)]
pub struct DecisionEngine {
    strategy: Arc<dyn Recommender>,
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::rule_based()
    }
}

impl DecisionEngine {
    pub fn rule_based() -> Self {
        Self {
            strategy: Arc::new(RuleBasedRecommender),
        }
    }

    pub fn model_backed(artifact: ModelArtifact) -> Self {
        Self {
            strategy: Arc::new(ModelBackedRecommender::new(artifact)),
        }
    }

    /// Model-backed when an artifact loaded, rule-based otherwise
    pub fn from_artifact(artifact: Option<ModelArtifact>) -> Self {
        match artifact {
            Some(artifact) => Self::model_backed(artifact),
            None => Self::rule_based(),
        }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn recommend(&self, request: &RecommendationRequest) -> Prediction {
        let prediction = self.strategy.recommend(request);
        debug!(
            strategy = self.strategy.name(),
            animal = %prediction.recommended_animal,
            success_rate = prediction.success_rate,
            "Prediction computed"
        );
        prediction
    }
}
