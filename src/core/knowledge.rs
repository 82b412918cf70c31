//! Animal Knowledge Base
//!
//! Static facts per species: display name, modal awal, deskripsi,
//! kebutuhan pakan, risiko kesehatan, dan tips. Dibangun sekali saat
//! pertama diakses, read-only setelahnya.

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::models::types::AnimalKey;

/// Fallback profile for unknown keys
pub const DEFAULT_ANIMAL: AnimalKey = AnimalKey::AyamPedaging;

#[derive(Debug, Clone)]
pub struct AnimalProfile {
    pub key: AnimalKey,
    pub name: &'static str,
    /// Modal awal (Rupiah)
    pub initial_cost: u64,
    pub description: &'static str,
    pub feed_requirements: &'static [&'static str],
    pub health_risks: &'static [&'static str],
    pub tips: &'static [&'static str],
}

lazy_static! {
    static ref ANIMAL_INFO: HashMap<AnimalKey, AnimalProfile> = {
        let profiles = [
            AnimalProfile {
                key: AnimalKey::AyamPedaging,
                name: "Ayam Pedaging",
                initial_cost: 5_000_000,
                description: "Ayam pedaging cocok untuk pemula dengan keuntungan cepat dalam 30-40 hari",
                feed_requirements: &[
                    "Konsentrat: 0.15kg/ekor/hari",
                    "Jagung: 0.1kg/ekor/hari",
                    "Vitamin: sesuai kebutuhan",
                ],
                health_risks: &[
                    "Penyakit ND (Newcastle Disease)",
                    "Penyakit AI (Avian Influenza)",
                    "Gumboro",
                ],
                tips: &[
                    "Vaksinasi teratur",
                    "Jaga kebersihan kandang",
                    "Kontrol suhu dan ventilasi",
                ],
            },
            AnimalProfile {
                key: AnimalKey::AyamPetelur,
                name: "Ayam Petelur",
                initial_cost: 6_000_000,
                description: "Ayam petelur memberikan pendapatan rutin dari telur dengan masa produktif 1-2 tahun",
                feed_requirements: &[
                    "Konsentrat layer: 0.12kg/ekor/hari",
                    "Kalsium: 0.05kg/ekor/hari",
                    "Vitamin: sesuai kebutuhan",
                ],
                health_risks: &["Penyakit CRD", "Tetelo", "Cacingan"],
                tips: &[
                    "Pencahayaan cukup 14-16 jam/hari",
                    "Pemberian vitamin rutin",
                    "Kandang bersih dan kering",
                ],
            },
            AnimalProfile {
                key: AnimalKey::SapiPotong,
                name: "Sapi Potong",
                initial_cost: 25_000_000,
                description: "Sapi potong memberikan keuntungan tinggi tetapi membutuhkan modal besar dan lahan luas",
                feed_requirements: &[
                    "Rumput: 30kg/ekor/hari",
                    "Konsentrat: 5kg/ekor/hari",
                    "Mineral: sesuai kebutuhan",
                ],
                health_risks: &["Penyakit mulut dan kuku", "Antraks", "Cacingan"],
                tips: &[
                    "Kandang luas dengan drainase baik",
                    "Perhatikan sanitasi kandang",
                    "Vaksinasi rutin",
                ],
            },
            AnimalProfile {
                key: AnimalKey::Kambing,
                name: "Kambing",
                initial_cost: 8_000_000,
                description: "Kambing mudah dipelihara dan memiliki permintaan pasar yang stabil",
                feed_requirements: &[
                    "Rumput: 10kg/ekor/hari",
                    "Konsentrat: 1kg/ekor/hari",
                    "Air minum: secukupnya",
                ],
                health_risks: &["Cacingan", "Scabies", "Pneumonia"],
                tips: &[
                    "Kandang kering dan bersih",
                    "Pemberian pakan berkualitas",
                    "Perhatikan kesehatan kaki",
                ],
            },
            AnimalProfile {
                key: AnimalKey::SapiPerah,
                name: "Sapi Perah",
                initial_cost: 30_000_000,
                description: "Sapi perah memberikan penghasilan rutin dari susu dengan perawatan intensif",
                feed_requirements: &[
                    "Hijauan: 40kg/ekor/hari",
                    "Konsentrat: 6kg/ekor/hari",
                    "Mineral: sesuai kebutuhan",
                ],
                health_risks: &["Mastitis", "Metritis", "Cacingan"],
                tips: &[
                    "Kandang bersih dan nyaman",
                    "Pemerahan yang hygienis",
                    "Pakan berkualitas tinggi",
                ],
            },
        ];

        profiles.into_iter().map(|p| (p.key, p)).collect()
    };
}

/// Profile for a known key
pub fn profile(key: AnimalKey) -> &'static AnimalProfile {
    // Tabel berisi semua varian AnimalKey
    &ANIMAL_INFO[&key]
}

/// Lookup by raw key; unknown keys resolve to the ayam_pedaging profile
pub fn lookup(animal_key: &str) -> &'static AnimalProfile {
    let key = AnimalKey::from_key(animal_key).unwrap_or(DEFAULT_ANIMAL);
    profile(key)
}

/// All profiles in `AnimalKey::ALL` order
pub fn all() -> impl Iterator<Item = &'static AnimalProfile> {
    AnimalKey::ALL.into_iter().map(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_has_profile() {
        for key in AnimalKey::ALL {
            let p = profile(key);
            assert_eq!(p.key, key);
            assert!(!p.feed_requirements.is_empty());
            assert!(!p.health_risks.is_empty());
            assert!(!p.tips.is_empty());
        }
        assert_eq!(all().count(), 5);
    }

    #[test]
    fn test_lookup_known_key() {
        let p = lookup("sapi_perah");
        assert_eq!(p.name, "Sapi Perah");
        assert_eq!(p.initial_cost, 30_000_000);
        assert_eq!(p.health_risks[0], "Mastitis");
    }

    #[test]
    fn test_lookup_unknown_key_falls_back() {
        for key in ["", "bebek", "Ayam_Pedaging", "kambing "] {
            assert_eq!(lookup(key).key, AnimalKey::AyamPedaging);
        }
        assert_eq!(lookup("bebek").initial_cost, 5_000_000);
    }
}
