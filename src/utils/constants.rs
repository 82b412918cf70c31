//! Constants Module - Single Source of Truth
//!
//! Semua konstanta rule table, default konfigurasi, dan nama artifact
//! didefinisikan di sini. Modul lain tidak boleh hardcode angka-angka ini.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Service name (dipakai di health check dan root endpoint)
pub const APP_NAME: &str = "TernakPro AI Recommendation API";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// SERVER DEFAULTS
// ============================================

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Batas waktu load model saat startup (detik)
pub const DEFAULT_MODEL_LOAD_TIMEOUT_SECS: u64 = 10;

/// Maximum in-flight requests
pub const DEFAULT_MAX_CONCURRENCY: usize = 256;

// ============================================
// MODEL ARTIFACT
// ============================================

pub const MODEL_FILE_NAME: &str = "rekomendasi_ternak_ternakpro_v1_model.json";

/// Lokasi artifact yang dicoba berurutan bila TERNAKPRO_MODEL_PATH tidak di-set
pub const MODEL_SEARCH_PATHS: [&str; 3] = [
    "models/rekomendasi_ternak_ternakpro_v1_model.json",
    "api/models/rekomendasi_ternak_ternakpro_v1_model.json",
    MODEL_FILE_NAME,
];

/// Number of regression outputs: success_rate, roi, market_demand
pub const MODEL_OUTPUTS: usize = 3;

// ============================================
// REQUEST DEFAULTS
// ============================================

pub const DEFAULT_REGION: &str = "jawa_barat";

// ============================================
// RULE TABLE
// ============================================

pub const MULTIPLIER_PEMULA: f64 = 0.8;
pub const MULTIPLIER_MENENGAH: f64 = 0.9;
pub const MULTIPLIER_AHLI: f64 = 1.0;

/// Multiplier untuk pengalaman yang tidak dikenal
pub const MULTIPLIER_DEFAULT: f64 = MULTIPLIER_PEMULA;

/// Land size thresholds for goal "daging" (m²)
pub const LAND_SMALL_LIMIT: f64 = 100.0;
pub const LAND_MEDIUM_LIMIT: f64 = 200.0;

pub const BASE_AYAM_PEDAGING: f64 = 0.85;
pub const BASE_KAMBING: f64 = 0.75;
pub const BASE_SAPI_POTONG: f64 = 0.80;
pub const BASE_AYAM_PETELUR: f64 = 0.78;
pub const BASE_SAPI_PERAH: f64 = 0.82;
pub const BASE_OTHER_GOAL: f64 = 0.70;

// ============================================
// DERIVED SCORES
// ============================================

/// ROI sekitar 40% dari success rate
pub const ROI_FACTOR: f64 = 0.4;

/// Market demand 80-100%
pub const MARKET_DEMAND_BASE: f64 = 0.8;
pub const MARKET_DEMAND_SPAN: f64 = 0.2;

// ============================================
// CONVERSION HELPERS
// ============================================

/// Score (0-1) -> persen, dibulatkan 1 desimal
#[inline]
pub fn to_percent(score: f64) -> f64 {
    (score * 1000.0).round() / 10.0
}
