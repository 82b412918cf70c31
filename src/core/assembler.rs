//! Response Assembler
//!
//! Menggabungkan request, prediction, dan profil hewan menjadi payload
//! `data` untuk `POST /api/recommend`.

use serde::Serialize;

use super::knowledge::AnimalProfile;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{AnimalKey, ModelState, Prediction, RecommendationRequest};
use crate::utils::constants::to_percent;

/// Recommendation payload (field names are part of the public API)
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationData {
    pub jenis_hewan: String,
    pub alasan: String,
    pub biaya_awal: u64,
    pub potensi_keuntungan: u64,
    pub roi: f64,
    pub kesesuaian_kondisi: f64,
    pub permintaan_pasar: f64,
    pub deskripsi: String,
    pub kebutuhan_pakan: Vec<String>,
    pub resiko_kesehatan: Vec<String>,
    pub tips: Vec<String>,
    pub model_used: String,
}

pub fn assemble(
    request: &RecommendationRequest,
    prediction: &Prediction,
    profile: &AnimalProfile,
    model_state: &ModelState,
) -> AppResult<RecommendationData> {
    if !prediction.is_finite() {
        return Err(AppError::internal(format!(
            "prediction for {} contains non-finite scores",
            prediction.recommended_animal
        )));
    }

    Ok(RecommendationData {
        jenis_hewan: profile.name.to_string(),
        alasan: explain(profile, request, prediction),
        biaya_awal: profile.initial_cost,
        potensi_keuntungan: profit_potential(profile.initial_cost, prediction.roi),
        roi: to_percent(prediction.roi),
        kesesuaian_kondisi: to_percent(prediction.success_rate),
        permintaan_pasar: to_percent(prediction.market_demand),
        deskripsi: profile.description.to_string(),
        kebutuhan_pakan: to_owned_list(profile.feed_requirements),
        resiko_kesehatan: to_owned_list(profile.health_risks),
        tips: to_owned_list(profile.tips),
        model_used: model_state.model_used().to_string(),
    })
}

/// floor(initial_cost × roi)
pub fn profit_potential(initial_cost: u64, roi: f64) -> u64 {
    (initial_cost as f64 * roi).floor().max(0.0) as u64
}

/// Penjelasan rekomendasi. Template dipilih dari key profil, bukan dari
/// `prediction.recommended_animal`, karena profil bisa hasil fallback lookup.
pub fn explain(profile: &AnimalProfile, request: &RecommendationRequest, prediction: &Prediction) -> String {
    let roi = prediction.roi * 100.0;
    let success = prediction.success_rate * 100.0;
    let demand = prediction.market_demand * 100.0;

    match profile.key {
        AnimalKey::AyamPedaging => format!(
            "Ayam pedaging direkomendasikan untuk lahan {:?}m² dengan tujuan {}. Cocok untuk {} dengan ROI {:.1}%",
            request.land_size, request.goal, request.experience, roi
        ),
        AnimalKey::AyamPetelur => format!(
            "Ayam petelur ideal untuk produksi telur dengan kesesuaian {:.1}%. Permintaan pasar stabil di {}",
            success, request.region
        ),
        AnimalKey::SapiPotong => format!(
            "Sapi potong cocok untuk lahan luas dengan potensi keuntungan tinggi. ROI mencapai {:.1}%",
            roi
        ),
        AnimalKey::Kambing => format!(
            "Kambing mudah dipelihara dan sesuai untuk {}. Permintaan pasar {:.1}%",
            request.experience, demand
        ),
        AnimalKey::SapiPerah => {
            "Sapi perah memberikan penghasilan rutin dari susu. Cocok untuk peternak dengan pengalaman".to_string()
        }
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
