//! Configuration module for the TernakPro API
//!
//! Semua nilai dibaca dari environment sekali saat startup, lalu
//! `ServiceConfig` diteruskan ke handler lewat `AppState`.
//!
//! Environment:
//!   TERNAKPRO_HOST                    - bind host (default: 0.0.0.0)
//!   PORT / TERNAKPRO_PORT             - bind port (default: 8000)
//!   TERNAKPRO_MODEL_PATH              - explicit model artifact path
//!   TERNAKPRO_MODEL_LOAD_TIMEOUT_SECS - startup load budget (default: 10)
//!   TERNAKPRO_MAX_CONCURRENCY         - in-flight request cap (default: 256)
//!   TERNAKPRO_REDACT_ERRORS           - hide internal error text (default: false)

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use super::errors::{AppError, AppResult};
use crate::utils::constants::{
    DEFAULT_HOST, DEFAULT_MAX_CONCURRENCY, DEFAULT_MODEL_LOAD_TIMEOUT_SECS, DEFAULT_PORT,
    MODEL_SEARCH_PATHS,
};

/// Runtime configuration for the recommendation service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// Explicit artifact path; overrides the search list
    pub model_path: Option<PathBuf>,
    pub model_load_timeout: Duration,
    pub max_concurrency: usize,
    /// Replace internal error text in 500 responses
    pub redact_internal_errors: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model_path: None,
            model_load_timeout: Duration::from_secs(DEFAULT_MODEL_LOAD_TIMEOUT_SECS),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            redact_internal_errors: false,
        }
    }
}

impl ServiceConfig {
    /// Build config from the process environment
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup (env, test maps)
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("TERNAKPRO_HOST")
            .filter(|h| !h.is_empty())
            .unwrap_or(defaults.host);

        // Platform hosting biasanya pakai PORT, TERNAKPRO_PORT untuk lokal
        let port = match lookup("PORT").or_else(|| lookup("TERNAKPRO_PORT")) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::invalid_config("PORT", &raw))?,
            None => defaults.port,
        };

        let model_path = lookup("TERNAKPRO_MODEL_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let model_load_timeout = match lookup("TERNAKPRO_MODEL_LOAD_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| AppError::invalid_config("TERNAKPRO_MODEL_LOAD_TIMEOUT_SECS", &raw))?,
            ),
            None => defaults.model_load_timeout,
        };

        let max_concurrency = match lookup("TERNAKPRO_MAX_CONCURRENCY") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(AppError::invalid_config("TERNAKPRO_MAX_CONCURRENCY", &raw)),
            },
            None => defaults.max_concurrency,
        };

        let redact_internal_errors = match lookup("TERNAKPRO_REDACT_ERRORS") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| AppError::invalid_config("TERNAKPRO_REDACT_ERRORS", &raw))?,
            None => defaults.redact_internal_errors,
        };

        Ok(Self {
            host,
            port,
            model_path,
            model_load_timeout,
            max_concurrency,
            redact_internal_errors,
        })
    }

    pub fn socket_addr(&self) -> AppResult<SocketAddr> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|_| AppError::invalid_config("TERNAKPRO_HOST", &self.host))
    }

    /// Artifact paths to try, in order
    pub fn model_candidates(&self) -> Vec<PathBuf> {
        match &self.model_path {
            Some(path) => vec![path.clone()],
            None => MODEL_SEARCH_PATHS.iter().map(PathBuf::from).collect(),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
