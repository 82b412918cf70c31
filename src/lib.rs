//! TernakPro Library
//!
//! Livestock recommendation engine behind the TernakPro API:
//! - Rule table keyed on goal, land size and experience
//! - Optional model-backed scoring with silent rule-based fallback
//! - Static knowledge base (modal awal, pakan, risiko kesehatan, tips)
//! - axum HTTP surface (`/`, `/api/health`, `/api/recommend`)

pub mod api;
pub mod core;
pub mod models;
pub mod utils;

pub use crate::core::{
    assemble, knowledge, predict_with_rules, AnimalProfile, DecisionEngine, ModelArtifact,
    RecommendationData, Recommender,
};
pub use api::{create_router, AppState};
pub use models::{
    AnimalKey, AppError, AppResult, ErrorCode, Experience, Goal, ModelState, Prediction,
    RecommendationRequest, ServiceConfig,
};
