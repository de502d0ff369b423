//! Soil analysis and recommendations

use rust_decimal::Decimal;
use serde::Serialize;

use shared::{
    classify_moisture, classify_nutrient, classify_ph, overall_health, CropType, MoistureStatus,
    NutrientLevel, PhClassification, PhStatus, SoilHealth, SoilSample, SoilType,
};

/// pH analysis
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PhAnalysis {
    pub ph_value: Decimal,
    pub classification: PhClassification,
    pub status: PhStatus,
    pub recommendations: Vec<String>,
}

/// Band and advisory for one nutrient
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NutrientAnalysis {
    pub level: NutrientLevel,
    pub recommendation: &'static str,
}

impl From<NutrientLevel> for NutrientAnalysis {
    fn from(level: NutrientLevel) -> Self {
        Self {
            level,
            recommendation: level.advice(),
        }
    }
}

/// NPK analysis
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NutrientReport {
    pub nitrogen: NutrientAnalysis,
    pub phosphorus: NutrientAnalysis,
    pub potassium: NutrientAnalysis,
}

impl NutrientReport {
    fn named(&self) -> [(&'static str, &NutrientAnalysis); 3] {
        [
            ("Nitrogen", &self.nitrogen),
            ("Phosphorus", &self.phosphorus),
            ("Potassium", &self.potassium),
        ]
    }

    /// All three nutrients are at Medium or above
    pub fn is_adequate(&self) -> bool {
        self.named()
            .iter()
            .all(|(_, n)| n.level >= NutrientLevel::Medium)
    }
}

/// Soil moisture analysis
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MoistureAnalysis {
    pub moisture: Decimal,
    pub status: MoistureStatus,
    pub recommendation: &'static str,
}

/// Derived fields for a stored soil measurement
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SoilMeasurementAnalysis {
    pub ph: PhAnalysis,
    pub nutrients: NutrientReport,
    pub moisture: Option<MoistureAnalysis>,
    pub ph_status: PhStatus,
    /// "adequate" or "deficient"
    pub nutrient_status: &'static str,
    pub overall_health: SoilHealth,
    pub recommendations: Vec<String>,
}

/// Soil analysis service
#[derive(Debug, Clone, Copy, Default)]
pub struct SoilAnalysisService;

impl SoilAnalysisService {
    pub fn new() -> Self {
        Self
    }

    /// Classify a pH reading and suggest lime or sulfur when needed
    pub fn analyze_soil_ph(&self, ph: Decimal) -> PhAnalysis {
        let (classification, status) = classify_ph(ph);
        let recommendations = match status {
            PhStatus::NeedsLime => vec!["Add agricultural lime to raise pH".to_string()],
            PhStatus::NeedsSulfur => vec!["Add sulfur to lower pH".to_string()],
            PhStatus::Good | PhStatus::Excellent => Vec::new(),
        };

        PhAnalysis {
            ph_value: ph,
            classification,
            status,
            recommendations,
        }
    }

    /// Classify each of N, P and K independently
    pub fn analyze_nutrients(
        &self,
        nitrogen: Decimal,
        phosphorus: Decimal,
        potassium: Decimal,
    ) -> NutrientReport {
        NutrientReport {
            nitrogen: classify_nutrient(nitrogen).into(),
            phosphorus: classify_nutrient(phosphorus).into(),
            potassium: classify_nutrient(potassium).into(),
        }
    }

    pub fn analyze_soil_moisture(&self, moisture: Decimal) -> MoistureAnalysis {
        let status = classify_moisture(moisture);
        MoistureAnalysis {
            moisture,
            status,
            recommendation: status.advice(),
        }
    }

    /// Soil-type advice followed by crop-type advice
    pub fn get_soil_recommendations(
        &self,
        soil_type: SoilType,
        crop_type: Option<CropType>,
    ) -> Vec<&'static str> {
        let mut recommendations: Vec<&'static str> = match soil_type {
            SoilType::Sandy => vec![
                "Add organic matter to improve water retention",
                "Apply fertilizer more frequently in small amounts",
            ],
            SoilType::Clay => vec![
                "Add organic matter to improve drainage",
                "Avoid overwatering to prevent waterlogging",
            ],
            SoilType::Loam => vec!["Ideal soil! Maintain organic matter levels"],
            SoilType::Other => Vec::new(),
        };

        let crop_advice = match crop_type {
            Some(CropType::Maize) => Some("Maize needs well-drained soil with pH 5.5-7.0"),
            Some(CropType::Beans) => Some("Beans prefer slightly acidic soil (pH 6.0-7.5)"),
            Some(CropType::Coffee) => Some("Coffee thrives in acidic volcanic soil (pH 5.0-6.5)"),
            Some(CropType::Tea) => Some("Tea needs acidic soil (pH 4.5-6.0)"),
            Some(CropType::Wheat | CropType::Potato | CropType::Tomato) | None => None,
        };
        recommendations.extend(crop_advice);

        recommendations
    }

    /// Compose every derived field of a soil measurement
    pub fn analyze_measurement(
        &self,
        sample: &SoilSample,
        soil_type: SoilType,
        crop_type: Option<CropType>,
    ) -> SoilMeasurementAnalysis {
        let ph = self.analyze_soil_ph(sample.ph_level);
        let nutrients =
            self.analyze_nutrients(sample.nitrogen, sample.phosphorus, sample.potassium);
        let moisture = sample.moisture.map(|m| self.analyze_soil_moisture(m));

        let health = overall_health(
            ph.status,
            nutrients.nitrogen.level,
            nutrients.phosphorus.level,
            nutrients.potassium.level,
        );
        let nutrient_status = if nutrients.is_adequate() {
            "adequate"
        } else {
            "deficient"
        };

        let mut recommendations = ph.recommendations.clone();
        recommendations.extend(
            nutrients
                .named()
                .iter()
                .filter(|(_, n)| n.level == NutrientLevel::Low)
                .map(|(name, n)| format!("{} is low: {}", name, n.recommendation)),
        );
        if let Some(m) = &moisture {
            recommendations.push(m.recommendation.to_string());
        }
        recommendations.extend(
            self.get_soil_recommendations(soil_type, crop_type)
                .into_iter()
                .map(String::from),
        );

        tracing::debug!(
            "Soil sample {}: pH {} ({}), nutrients {}, health {:?}",
            sample.measurement_date,
            sample.ph_level,
            ph.classification,
            nutrient_status,
            health
        );

        SoilMeasurementAnalysis {
            ph_status: ph.status,
            ph,
            nutrients,
            moisture,
            nutrient_status,
            overall_health: health,
            recommendations,
        }
    }
}
