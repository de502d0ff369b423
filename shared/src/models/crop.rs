//! Crop models and growth-stage tables

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Crops tracked by the platform
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CropType {
    Maize,
    Beans,
    Wheat,
    Coffee,
    Tea,
    Potato,
    Tomato,
}

impl CropType {
    /// Canonical order used for listings and summaries
    pub const ALL: [CropType; 7] = [
        CropType::Maize,
        CropType::Beans,
        CropType::Wheat,
        CropType::Coffee,
        CropType::Tea,
        CropType::Potato,
        CropType::Tomato,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Maize => "maize",
            CropType::Beans => "beans",
            CropType::Wheat => "wheat",
            CropType::Coffee => "coffee",
            CropType::Tea => "tea",
            CropType::Potato => "potato",
            CropType::Tomato => "tomato",
        }
    }

    /// Parse the lowercase code used in stored records
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_lowercase();
        CropType::ALL.into_iter().find(|c| c.as_str() == code)
    }

    /// Expected days from planting to harvest, used for progress display
    pub fn expected_cycle_days(&self) -> i64 {
        match self {
            CropType::Beans | CropType::Tomato => 90,
            CropType::Coffee | CropType::Tea => 150,
            _ => 120,
        }
    }
}

impl std::fmt::Display for CropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropType::Maize => write!(f, "Maize"),
            CropType::Beans => write!(f, "Beans"),
            CropType::Wheat => write!(f, "Wheat"),
            CropType::Coffee => write!(f, "Coffee"),
            CropType::Tea => write!(f, "Tea"),
            CropType::Potato => write!(f, "Potato"),
            CropType::Tomato => write!(f, "Tomato"),
        }
    }
}

/// Growth stages in the order a crop moves through them
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    #[default]
    Germination,
    Vegetative,
    Flowering,
    Fruiting,
    Maturity,
    Harvest,
}

/// (day threshold, stage) pairs, ascending
type StageTable = [(i64, GrowthStage); 6];

const MAIZE_STAGES: StageTable = [
    (0, GrowthStage::Germination),
    (14, GrowthStage::Vegetative),
    (60, GrowthStage::Flowering),
    (80, GrowthStage::Fruiting),
    (100, GrowthStage::Maturity),
    (120, GrowthStage::Harvest),
];

const BEANS_STAGES: StageTable = [
    (0, GrowthStage::Germination),
    (10, GrowthStage::Vegetative),
    (35, GrowthStage::Flowering),
    (50, GrowthStage::Fruiting),
    (70, GrowthStage::Maturity),
    (90, GrowthStage::Harvest),
];

const WHEAT_STAGES: StageTable = [
    (0, GrowthStage::Germination),
    (21, GrowthStage::Vegetative),
    (60, GrowthStage::Flowering),
    (80, GrowthStage::Fruiting),
    (100, GrowthStage::Maturity),
    (120, GrowthStage::Harvest),
];

impl GrowthStage {
    pub const ALL: [GrowthStage; 6] = [
        GrowthStage::Germination,
        GrowthStage::Vegetative,
        GrowthStage::Flowering,
        GrowthStage::Fruiting,
        GrowthStage::Maturity,
        GrowthStage::Harvest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Germination => "germination",
            GrowthStage::Vegetative => "vegetative",
            GrowthStage::Flowering => "flowering",
            GrowthStage::Fruiting => "fruiting",
            GrowthStage::Maturity => "maturity",
            GrowthStage::Harvest => "harvest",
        }
    }

    /// The stage that follows this one, if any
    pub fn next(&self) -> Option<GrowthStage> {
        match self {
            GrowthStage::Germination => Some(GrowthStage::Vegetative),
            GrowthStage::Vegetative => Some(GrowthStage::Flowering),
            GrowthStage::Flowering => Some(GrowthStage::Fruiting),
            GrowthStage::Fruiting => Some(GrowthStage::Maturity),
            GrowthStage::Maturity => Some(GrowthStage::Harvest),
            GrowthStage::Harvest => None,
        }
    }

    /// Stage thresholds for a crop; crops without their own table use maize's
    fn thresholds(crop_type: CropType) -> &'static StageTable {
        match crop_type {
            CropType::Beans => &BEANS_STAGES,
            CropType::Wheat => &WHEAT_STAGES,
            CropType::Maize
            | CropType::Coffee
            | CropType::Tea
            | CropType::Potato
            | CropType::Tomato => &MAIZE_STAGES,
        }
    }

    /// Stage whose threshold is the largest value not exceeding `days`
    pub fn for_days(crop_type: CropType, days: i64) -> GrowthStage {
        Self::thresholds(crop_type)
            .iter()
            .rev()
            .find(|(threshold, _)| days >= *threshold)
            .map(|(_, stage)| *stage)
            .unwrap_or(GrowthStage::Germination)
    }
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrowthStage::Germination => write!(f, "Germination"),
            GrowthStage::Vegetative => write!(f, "Vegetative"),
            GrowthStage::Flowering => write!(f, "Flowering"),
            GrowthStage::Fruiting => write!(f, "Fruiting"),
            GrowthStage::Maturity => write!(f, "Maturity"),
            GrowthStage::Harvest => write!(f, "Harvest"),
        }
    }
}

/// Read-only view of a planted crop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropSnapshot {
    pub id: Uuid,
    pub crop_type: CropType,
    #[serde(default)]
    pub variety: Option<String>,
    pub planting_date: NaiveDate,
    #[serde(default)]
    pub expected_harvest_date: Option<NaiveDate>,
    #[serde(default)]
    pub actual_harvest_date: Option<NaiveDate>,
    /// Area in acres
    pub area_planted: Decimal,
    #[serde(default)]
    pub current_stage: GrowthStage,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl CropSnapshot {
    pub fn days_since_planting(&self, today: NaiveDate) -> i64 {
        (today - self.planting_date).num_days()
    }

    /// Growth progress against the crop's expected cycle, capped at 100
    pub fn growth_progress_percentage(&self, today: NaiveDate) -> i64 {
        let days = self.days_since_planting(today);
        let expected = self.crop_type.expected_cycle_days();
        (days * 100 / expected).min(100)
    }

    /// Crop has lingered too long in an early stage
    pub fn needs_attention(&self, today: NaiveDate) -> bool {
        let days = self.days_since_planting(today);
        match self.current_stage {
            GrowthStage::Germination => days > 21,
            GrowthStage::Vegetative => days > 70,
            _ => false,
        }
    }

    /// Harvested crops are inactive and carry a harvest date
    pub fn is_harvested(&self) -> bool {
        !self.is_active && self.actual_harvest_date.is_some()
    }
}
