//! Core Module - Business Logic
//!
//! Otak aplikasi: rule table, model-backed scoring, knowledge base,
//! dan perakitan response.

pub mod assembler;
pub mod decision;
pub mod inference;
pub mod knowledge;

pub use assembler::{assemble, RecommendationData};
pub use decision::{predict_with_rules, DecisionEngine, Recommender, RuleBasedRecommender};
pub use inference::{load_model, ModelArtifact, ModelBackedRecommender};
pub use knowledge::AnimalProfile;
