//! WebAssembly module for the Climate Monitor platform
//!
//! Provides client-side computation for:
//! - Climate classification
//! - Soil pH, nutrient and health bands
//! - Growth stage estimates
//! - Irrigation frequency
//! - Offline record validation

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

fn decimal(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

/// Köppen-style climate code (BW, BS, Af, Aw, C, H, Cfa)
#[wasm_bindgen]
pub fn classify_climate_code(temperature: f64, annual_rainfall: f64) -> String {
    ClimateCategory::classify(temperature, annual_rainfall)
        .code()
        .to_string()
}

/// Human-readable climate label
#[wasm_bindgen]
pub fn classify_climate_label(temperature: f64, annual_rainfall: f64) -> String {
    ClimateCategory::classify(temperature, annual_rainfall).to_string()
}

/// pH band, e.g. "Slightly Acidic"
#[wasm_bindgen]
pub fn classify_soil_ph(ph: f64) -> String {
    classify_ph(decimal(ph)).0.to_string()
}

#[wasm_bindgen]
pub fn classify_nutrient_level(ppm: f64) -> String {
    classify_nutrient(decimal(ppm)).to_string()
}

/// Overall soil health from pH and NPK readings
#[wasm_bindgen]
pub fn soil_health(ph: f64, nitrogen: f64, phosphorus: f64, potassium: f64) -> String {
    let (_, status) = classify_ph(decimal(ph));
    let health = overall_health(
        status,
        classify_nutrient(decimal(nitrogen)),
        classify_nutrient(decimal(phosphorus)),
        classify_nutrient(decimal(potassium)),
    );
    match health {
        SoilHealth::Poor => "poor",
        SoilHealth::Fair => "fair",
        SoilHealth::Good => "good",
        SoilHealth::Excellent => "excellent",
    }
    .to_string()
}

/// Irrigation frequency for a weekly water deficit in mm
#[wasm_bindgen]
pub fn irrigation_frequency(deficit_mm: f64) -> String {
    IrrigationFrequency::from_deficit(deficit_mm).to_string()
}

/// Growth stage for a crop code after `days` days; `None` for unknown crops
#[wasm_bindgen]
pub fn growth_stage_for_days(crop_code: &str, days: i32) -> Option<String> {
    let crop_type = CropType::from_code(crop_code)?;
    Some(
        GrowthStage::for_days(crop_type, i64::from(days))
            .as_str()
            .to_string(),
    )
}

/// Validate a soil sample JSON record; returns the offending field, if any
#[wasm_bindgen]
pub fn soil_sample_error(sample_json: &str) -> Option<String> {
    match serde_json::from_str::<SoilSample>(sample_json) {
        Ok(sample) => validate_soil_sample(&sample)
            .err()
            .map(|(field, _)| field.to_string()),
        Err(_) => Some("json".to_string()),
    }
}
