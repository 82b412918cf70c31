//! API Request/Response Types

use serde::Serialize;
use std::collections::BTreeMap;

pub use crate::core::assembler::RecommendationData;
pub use crate::models::types::RecommendationRequest;

/// Success wrapper: `{success: true, data: ...}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { success: true, data }
    }
}

// ============================================
// Health Check
// ============================================

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub model_loaded: bool,
    pub model_error: Option<String>,
    pub service: String,
    /// RFC 3339
    pub timestamp: String,
}

// ============================================
// Root
// ============================================

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: String,
    pub status: String,
    pub version: String,
    pub endpoints: BTreeMap<String, String>,
}
