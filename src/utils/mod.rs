//! Utils Module - Helper Functions & Shared Utilities
//!
//! Konstanta dan fungsi konversi yang dipakai di seluruh aplikasi.

pub mod constants;

pub use constants::*;
