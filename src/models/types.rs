//! Core types: request, prediction, animal keys, model state

use serde::Deserialize;
use std::fmt;

use super::errors::{AppError, AppResult};
use crate::utils::constants::{
    DEFAULT_REGION, MARKET_DEMAND_BASE, MARKET_DEMAND_SPAN, MULTIPLIER_AHLI, MULTIPLIER_DEFAULT,
    MULTIPLIER_MENENGAH, MULTIPLIER_PEMULA, ROI_FACTOR,
};

// ============================================
// Request
// ============================================

/// Kondisi peternak yang dikirim ke `POST /api/recommend`
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default = "default_region")]
    pub region: String,
    /// Luas lahan dalam m²
    pub land_size: f64,
    pub goal: String,
    pub available_feed: String,
    pub time_availability: String,
    pub experience: String,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl RecommendationRequest {
    /// Reject values the rule table can't branch on
    pub fn validate(&self) -> AppResult<()> {
        if !self.land_size.is_finite() {
            return Err(AppError::unprocessable("land_size must be a finite number"));
        }
        if self.land_size < 0.0 {
            return Err(AppError::unprocessable(format!(
                "land_size must be >= 0, got {}",
                self.land_size
            )));
        }
        Ok(())
    }

    pub fn goal(&self) -> Goal {
        Goal::from_raw(&self.goal)
    }

    pub fn experience(&self) -> Experience {
        Experience::from_raw(&self.experience)
    }
}

/// Tujuan beternak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    Daging,
    Telur,
    Susu,
    Other,
}

impl Goal {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "daging" => Self::Daging,
            "telur" => Self::Telur,
            "susu" => Self::Susu,
            _ => Self::Other,
        }
    }
}

/// Tingkat pengalaman peternak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Experience {
    Pemula,
    Menengah,
    Ahli,
    Other,
}

impl Experience {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "pemula" => Self::Pemula,
            "menengah" => Self::Menengah,
            "ahli" => Self::Ahli,
            _ => Self::Other,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Pemula => MULTIPLIER_PEMULA,
            Self::Menengah => MULTIPLIER_MENENGAH,
            Self::Ahli => MULTIPLIER_AHLI,
            Self::Other => MULTIPLIER_DEFAULT,
        }
    }
}

// ============================================
// Animal keys
// ============================================

/// Internal identifier for a livestock species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimalKey {
    AyamPedaging,
    AyamPetelur,
    SapiPotong,
    Kambing,
    SapiPerah,
}

impl AnimalKey {
    pub const ALL: [AnimalKey; 5] = [
        Self::AyamPedaging,
        Self::AyamPetelur,
        Self::SapiPotong,
        Self::Kambing,
        Self::SapiPerah,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AyamPedaging => "ayam_pedaging",
            Self::AyamPetelur => "ayam_petelur",
            Self::SapiPotong => "sapi_potong",
            Self::Kambing => "kambing",
            Self::SapiPerah => "sapi_perah",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

impl fmt::Display for AnimalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================
// Prediction
// ============================================

/// Output of the decision engine.
///
/// `roi` and `market_demand` are always derived from `success_rate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub recommended_animal: AnimalKey,
    /// 0.0-1.0
    pub success_rate: f64,
    pub roi: f64,
    /// 0.8-1.0
    pub market_demand: f64,
}

impl Prediction {
    pub fn from_success_rate(animal: AnimalKey, success_rate: f64) -> Self {
        let success_rate = success_rate.clamp(0.0, 1.0);
        Self {
            recommended_animal: animal,
            success_rate,
            roi: success_rate * ROI_FACTOR,
            market_demand: MARKET_DEMAND_BASE + success_rate * MARKET_DEMAND_SPAN,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.success_rate.is_finite() && self.roi.is_finite() && self.market_demand.is_finite()
    }
}

// ============================================
// Model state
// ============================================

/// Hasil load model saat startup. Tidak berubah setelah server jalan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelState {
    pub loaded: bool,
    pub error: Option<String>,
}

impl ModelState {
    pub fn loaded() -> Self {
        Self {
            loaded: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            loaded: false,
            error: Some(error.into()),
        }
    }

    /// Value reported as `model_used`
    pub fn model_used(&self) -> &'static str {
        if self.loaded {
            "ml_model"
        } else {
            "rule_based"
        }
    }
}
