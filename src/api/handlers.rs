//! API Request Handlers

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{header, HeaderMap};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use super::types::*;
use crate::core::{assemble, knowledge, load_model, DecisionEngine};
use crate::models::config::ServiceConfig;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::ModelState;
use crate::utils::constants::{APP_NAME, APP_VERSION};

/// Shared application state, built once before serving traffic
pub struct AppState {
    pub config: ServiceConfig,
    pub model_state: ModelState,
    pub engine: DecisionEngine,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: ServiceConfig, model_state: ModelState, engine: DecisionEngine) -> Self {
        Self {
            config,
            model_state,
            engine,
            start_time: Instant::now(),
        }
    }

    /// Try the model artifact, then pick the matching strategy
    pub async fn initialize(config: ServiceConfig) -> Self {
        let (model_state, artifact) = load_model(&config).await;
        let engine = DecisionEngine::from_artifact(artifact);
        info!(strategy = engine.strategy_name(), "🧠 Decision engine ready");
        Self::new(config, model_state, engine)
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Wrap an unexpected failure as a 500 for the recommend endpoint
    fn processing_error(&self, err: AppError) -> AppError {
        error!(code = err.code_str(), "❌ Error processing request: {}", err.detail());
        let message = if self.config.redact_internal_errors {
            "internal error".to_string()
        } else {
            err.message
        };
        AppError::internal(format!("Error processing request: {}", message))
    }
}

// ============================================
// Root
// ============================================

pub async fn root() -> Json<ServiceInfo> {
    let endpoints = BTreeMap::from([
        ("POST /api/recommend".to_string(), "Get livestock recommendation".to_string()),
        ("GET /api/health".to_string(), "Health check".to_string()),
        ("GET /".to_string(), "Root endpoint".to_string()),
    ]);

    Json(ServiceInfo {
        message: APP_NAME.to_string(),
        status: "online".to_string(),
        version: APP_VERSION.to_string(),
        endpoints,
    })
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthData> {
    Json(HealthData {
        status: "healthy".to_string(),
        model_loaded: state.model_state.loaded,
        model_error: state.model_state.error.clone(),
        service: APP_NAME.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

// ============================================
// Recommendation
// ============================================

/// Body tanpa Content-Type tetap diparse sebagai JSON; hanya media type
/// non-JSON yang ditolak.
fn accepts_json(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return true;
    };
    let mime = value
        .to_str()
        .unwrap_or_default()
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

pub async fn recommend(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<ApiResponse<RecommendationData>>> {
    let start = Instant::now();

    if !accepts_json(&headers) {
        return Err(AppError::unprocessable(
            "Expected request with `Content-Type: application/json`",
        ));
    }
    let Json(request) = Json::<RecommendationRequest>::from_bytes(&body)
        .map_err(|rejection| AppError::unprocessable(rejection.body_text()))?;
    request.validate()?;

    let prediction = state.engine.recommend(&request);
    let profile = knowledge::lookup(prediction.recommended_animal.as_str());

    let data = assemble(&request, &prediction, profile, &state.model_state)
        .map_err(|e| state.processing_error(e))?;

    info!(
        goal = %request.goal,
        land_size = request.land_size,
        experience = %request.experience,
        animal = %prediction.recommended_animal,
        model_used = %data.model_used,
        latency_us = start.elapsed().as_micros() as u64,
        "🐄 Recommendation served"
    );

    Ok(Json(ApiResponse::success(data)))
}

// ============================================
// Fallback
// ============================================

pub async fn not_found() -> AppError {
    AppError::not_found()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ErrorCode;

    fn state(redact: bool) -> AppState {
        let config = ServiceConfig {
            redact_internal_errors: redact,
            ..ServiceConfig::default()
        };
        AppState::new(config, ModelState::default(), DecisionEngine::rule_based())
    }

    #[test]
    fn test_processing_error_keeps_message() {
        let err = state(false).processing_error(AppError::internal("scores out of range"));
        assert_eq!(err.code, ErrorCode::ApiInternalError);
        assert_eq!(err.message, "Error processing request: scores out of range");
    }

    #[test]
    fn test_processing_error_redacted() {
        let err = state(true).processing_error(AppError::internal("scores out of range"));
        assert_eq!(err.message, "Error processing request: internal error");
    }

    #[test]
    fn test_accepts_json_content_types() {
        let mut headers = HeaderMap::new();
        assert!(accepts_json(&headers));

        headers.insert(header::CONTENT_TYPE, "application/json; charset=utf-8".parse().unwrap());
        assert!(accepts_json(&headers));

        headers.insert(header::CONTENT_TYPE, "application/vnd.api+json".parse().unwrap());
        assert!(accepts_json(&headers));

        headers.insert(header::CONTENT_TYPE, "text/plain".parse().unwrap());
        assert!(!accepts_json(&headers));
    }

    #[tokio::test]
    async fn test_initialize_without_artifact_is_rule_based() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServiceConfig {
            model_path: Some(dir.path().join("missing.json")),
            ..ServiceConfig::default()
        };

        let app = AppState::initialize(config).await;
        assert!(!app.model_state.loaded);
        assert_eq!(app.engine.strategy_name(), "rule_based");
        assert_eq!(app.uptime_seconds(), 0);
    }
}
