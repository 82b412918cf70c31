//! Integration tests for the TernakPro decision pipeline

use ternakpro::{
    assemble, knowledge, predict_with_rules, AnimalKey, DecisionEngine, ModelArtifact, ModelState,
    RecommendationRequest,
};

fn request(goal: &str, land_size: f64, experience: &str) -> RecommendationRequest {
    RecommendationRequest {
        region: "jawa_barat".to_string(),
        land_size,
        goal: goal.to_string(),
        available_feed: "rumput".to_string(),
        time_availability: "penuh".to_string(),
        experience: experience.to_string(),
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

const EXPERIENCES: [(&str, f64); 4] = [("pemula", 0.8), ("menengah", 0.9), ("ahli", 1.0), ("sesepuh", 0.8)];

#[test]
fn test_daging_branches_follow_land_size() {
    let cases = [
        (0.0, AnimalKey::AyamPedaging, 0.85),
        (99.0, AnimalKey::AyamPedaging, 0.85),
        (100.0, AnimalKey::Kambing, 0.75),
        (150.0, AnimalKey::Kambing, 0.75),
        (200.0, AnimalKey::SapiPotong, 0.80),
        (1_000.0, AnimalKey::SapiPotong, 0.80),
    ];

    for (land, animal, base) in cases {
        for (exp, multiplier) in EXPERIENCES {
            let p = predict_with_rules(&request("daging", land, exp));
            assert_eq!(p.recommended_animal, animal, "land {land}");
            assert!(close(p.success_rate, base * multiplier), "land {land} exp {exp}");
        }
    }
}

#[test]
fn test_non_daging_goals_ignore_land_size() {
    for land in [0.0, 150.0, 999.0] {
        for (exp, multiplier) in EXPERIENCES {
            let telur = predict_with_rules(&request("telur", land, exp));
            assert_eq!(telur.recommended_animal, AnimalKey::AyamPetelur);
            assert!(close(telur.success_rate, 0.78 * multiplier));

            let susu = predict_with_rules(&request("susu", land, exp));
            assert_eq!(susu.recommended_animal, AnimalKey::SapiPerah);
            assert!(close(susu.success_rate, 0.82 * multiplier));

            let other = predict_with_rules(&request("kulit", land, exp));
            assert_eq!(other.recommended_animal, AnimalKey::AyamPedaging);
            assert!(close(other.success_rate, 0.70 * multiplier));
        }
    }
}

#[test]
fn test_profit_potential_is_floor_of_cost_times_roi() {
    let model_state = ModelState::failed("Model file not found");
    for goal in ["daging", "telur", "susu", "lain"] {
        for land in [10.0, 120.0, 500.0] {
            for (exp, _) in EXPERIENCES {
                let req = request(goal, land, exp);
                let p = predict_with_rules(&req);
                let profile = knowledge::lookup(p.recommended_animal.as_str());
                let data = assemble(&req, &p, profile, &model_state).unwrap();

                assert_eq!(data.biaya_awal, profile.initial_cost);
                assert_eq!(
                    data.potensi_keuntungan,
                    (profile.initial_cost as f64 * p.roi).floor() as u64
                );
                assert_eq!(data.jenis_hewan, profile.name);
            }
        }
    }
}

#[test]
fn test_unknown_animal_key_resolves_to_ayam_pedaging() {
    let fallback = knowledge::lookup("unta");
    assert_eq!(fallback.key, AnimalKey::AyamPedaging);
    assert_eq!(fallback.name, "Ayam Pedaging");
}

#[test]
fn test_model_backed_engine_keeps_rule_animal() {
    let artifact = ModelArtifact::from_json_str(
        r#"{
            "feature_mapping": ["goal", "experience", "land_size"],
            "encoders": {
                "goal": ["daging", "telur", "susu"],
                "experience": ["pemula", "menengah", "ahli"]
            },
            "scaler": { "mean": [0.0, 0.0, 0.0], "scale": [1.0, 1.0, 1.0] },
            "model": {
                "coefficients": [[0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]],
                "intercepts": [0.9, 0.5, 0.5]
            }
        }"#,
    )
    .unwrap();

    let engine = DecisionEngine::from_artifact(Some(artifact));
    assert_eq!(engine.strategy_name(), "ml_model");

    let p = engine.recommend(&request("daging", 250.0, "pemula"));
    assert_eq!(p.recommended_animal, AnimalKey::SapiPotong);
    assert!(close(p.success_rate, 0.9));
    assert!(close(p.roi, 0.36));
    assert!(close(p.market_demand, 0.98));
}
