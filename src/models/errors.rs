//! Centralized Error Handling Module
//!
//! Setiap kegagalan memiliki kode error yang unik supaya mudah dilacak di log.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - API_xxx: HTTP/API errors
//! - MODEL_xxx: Model artifact load & inference errors
//! - CFG_xxx: Configuration errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use std::time::Duration;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    /// Message plus the underlying cause, if any
    pub fn detail(&self) -> String {
        match &self.source {
            Some(source) => format!("{}: {}", self.message, source),
            None => self.message.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // API Errors
    // ============================================
    /// Request parsed but failed validation
    ApiUnprocessable,
    /// Resource not found
    ApiNotFound,
    /// Internal server error
    ApiInternalError,

    // ============================================
    // Model Errors
    // ============================================
    /// No artifact at any candidate path
    ModelNotFound,
    /// I/O or parse failure while loading
    ModelLoadFailed,
    /// Loading exceeded the startup budget
    ModelLoadTimeout,
    /// Artifact parsed but shapes/features don't fit
    ModelIncompatible,
    /// Inference produced an unusable result
    ModelInferenceFailed,

    // ============================================
    // Configuration Errors
    // ============================================
    ConfigInvalidValue,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiUnprocessable => "API_UNPROCESSABLE",
            Self::ApiNotFound => "API_NOT_FOUND",
            Self::ApiInternalError => "API_INTERNAL_ERROR",

            Self::ModelNotFound => "MODEL_NOT_FOUND",
            Self::ModelLoadFailed => "MODEL_LOAD_FAILED",
            Self::ModelLoadTimeout => "MODEL_LOAD_TIMEOUT",
            Self::ModelIncompatible => "MODEL_INCOMPATIBLE",
            Self::ModelInferenceFailed => "MODEL_INFERENCE_FAILED",

            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ApiNotFound => 404,
            Self::ApiUnprocessable => 422,
            _ => 500,
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiUnprocessable, msg)
    }

    pub fn not_found() -> Self {
        Self::new(ErrorCode::ApiNotFound, "Not Found")
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiInternalError, msg)
    }

    pub fn model_not_found() -> Self {
        Self::new(ErrorCode::ModelNotFound, "Model file not found")
    }

    pub fn model_timeout(budget: Duration) -> Self {
        Self::new(
            ErrorCode::ModelLoadTimeout,
            format!("Model load timed out after {:?}", budget),
        )
    }

    pub fn model_incompatible(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ModelIncompatible, msg)
    }

    pub fn inference_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ModelInferenceFailed, msg)
    }

    pub fn invalid_config(key: &str, value: &str) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid value for {}: {:?}", key, value),
        )
    }
}

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// HTTP rendering
// ============================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({ "detail": self.message }))).into_response()
    }
}

// ============================================
// Conversion from common error types
// ============================================

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorCode::ModelLoadFailed, "IO error", err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::ModelLoadFailed, "JSON parse error", err)
    }
}
