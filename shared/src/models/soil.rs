//! Soil measurement models and classification bands

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Soil texture recorded on the farm
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SoilType {
    Sandy,
    Clay,
    Loam,
    #[default]
    #[serde(other)]
    Other,
}

/// A soil test result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilSample {
    pub measurement_date: NaiveDate,
    /// pH, 0-14
    pub ph_level: Decimal,
    /// ppm
    pub nitrogen: Decimal,
    /// ppm
    pub phosphorus: Decimal,
    /// ppm
    pub potassium: Decimal,
    /// Percent
    #[serde(default)]
    pub organic_matter: Option<Decimal>,
    /// Percent
    #[serde(default)]
    pub moisture: Option<Decimal>,
    /// Degrees Celsius
    #[serde(default)]
    pub temperature: Option<Decimal>,
}

/// pH classification band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PhClassification {
    Acidic,
    #[serde(rename = "Slightly Acidic")]
    SlightlyAcidic,
    Neutral,
    #[serde(rename = "Slightly Alkaline")]
    SlightlyAlkaline,
    Alkaline,
}

impl std::fmt::Display for PhClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhClassification::Acidic => write!(f, "Acidic"),
            PhClassification::SlightlyAcidic => write!(f, "Slightly Acidic"),
            PhClassification::Neutral => write!(f, "Neutral"),
            PhClassification::SlightlyAlkaline => write!(f, "Slightly Alkaline"),
            PhClassification::Alkaline => write!(f, "Alkaline"),
        }
    }
}

/// Management status implied by the pH band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PhStatus {
    NeedsLime,
    Good,
    Excellent,
    NeedsSulfur,
}

impl PhStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhStatus::NeedsLime => "needs_lime",
            PhStatus::Good => "good",
            PhStatus::Excellent => "excellent",
            PhStatus::NeedsSulfur => "needs_sulfur",
        }
    }
}

/// NPK band in ppm
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum NutrientLevel {
    Low,
    Medium,
    High,
}

impl NutrientLevel {
    /// Fixed advisory for the band
    pub fn advice(&self) -> &'static str {
        match self {
            NutrientLevel::Low => "Add fertilizer",
            NutrientLevel::Medium => "Maintain levels",
            NutrientLevel::High => "Sufficient",
        }
    }
}

impl std::fmt::Display for NutrientLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NutrientLevel::Low => write!(f, "Low"),
            NutrientLevel::Medium => write!(f, "Medium"),
            NutrientLevel::High => write!(f, "High"),
        }
    }
}

/// Soil moisture band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MoistureStatus {
    Dry,
    Low,
    Optimal,
    Saturated,
}

impl MoistureStatus {
    pub fn advice(&self) -> &'static str {
        match self {
            MoistureStatus::Dry => "Irrigation needed immediately",
            MoistureStatus::Low => "Consider irrigation soon",
            MoistureStatus::Optimal => "Moisture level is good",
            MoistureStatus::Saturated => "Improve drainage, reduce watering",
        }
    }
}

/// Overall soil health
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum SoilHealth {
    Poor,
    #[default]
    Fair,
    Good,
    Excellent,
}

/// Classify a pH reading; exactly 7.0 is the only neutral value
pub fn classify_ph(ph: Decimal) -> (PhClassification, PhStatus) {
    let seven = Decimal::from(7);
    if ph < Decimal::new(55, 1) {
        (PhClassification::Acidic, PhStatus::NeedsLime)
    } else if ph < seven {
        (PhClassification::SlightlyAcidic, PhStatus::Good)
    } else if ph == seven {
        (PhClassification::Neutral, PhStatus::Excellent)
    } else if ph < Decimal::from(8) {
        (PhClassification::SlightlyAlkaline, PhStatus::Good)
    } else {
        (PhClassification::Alkaline, PhStatus::NeedsSulfur)
    }
}

/// Classify a nutrient reading in ppm
pub fn classify_nutrient(ppm: Decimal) -> NutrientLevel {
    if ppm < Decimal::from(30) {
        NutrientLevel::Low
    } else if ppm < Decimal::from(60) {
        NutrientLevel::Medium
    } else {
        NutrientLevel::High
    }
}

/// Classify soil moisture percentage
pub fn classify_moisture(percent: Decimal) -> MoistureStatus {
    if percent < Decimal::from(20) {
        MoistureStatus::Dry
    } else if percent < Decimal::from(40) {
        MoistureStatus::Low
    } else if percent < Decimal::from(70) {
        MoistureStatus::Optimal
    } else {
        MoistureStatus::Saturated
    }
}

/// Compose overall health from the pH status and the three nutrient bands.
///
/// Excellent requires a good or excellent pH and no Low nutrient. Otherwise
/// only a `good` pH status lifts the result to Good; an `excellent` pH with a
/// Low nutrient is Fair.
pub fn overall_health(
    ph_status: PhStatus,
    nitrogen: NutrientLevel,
    phosphorus: NutrientLevel,
    potassium: NutrientLevel,
) -> SoilHealth {
    let ph_ok = matches!(ph_status, PhStatus::Good | PhStatus::Excellent);
    let nutrients_ok = [nitrogen, phosphorus, potassium]
        .iter()
        .all(|level| *level >= NutrientLevel::Medium);

    if ph_ok && nutrients_ok {
        SoilHealth::Excellent
    } else if ph_status == PhStatus::Good {
        SoilHealth::Good
    } else {
        SoilHealth::Fair
    }
}
