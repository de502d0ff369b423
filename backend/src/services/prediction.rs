//! Yield prediction from weather history and growth stage

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use shared::{
    to_decimal, to_f64, CropSnapshot, CropType, GrowthStage, PredictionFactors, WeatherSample,
    YieldPrediction,
};

/// Confidence reported when no weather data is available
pub const MIN_CONFIDENCE: f64 = 30.0;
pub const MAX_CONFIDENCE: f64 = 95.0;

/// Days of samples that count as complete data
const FULL_DATA_DAYS: f64 = 30.0;

const TEMPERATURE_WEIGHT: f64 = 0.35;
const RAINFALL_WEIGHT: f64 = 0.40;
const HUMIDITY_WEIGHT: f64 = 0.25;

/// Optimal relative humidity band (%)
const HUMIDITY_RANGE: (f64, f64) = (60.0, 80.0);

/// Temperature standard deviation above which crops are stressed
const TEMPERATURE_STRESS_STDDEV: f64 = 5.0;

/// Base yield in bags per acre
pub fn base_yield_per_acre(crop_type: CropType) -> u32 {
    match crop_type {
        CropType::Maize => 15,
        CropType::Beans => 8,
        CropType::Wheat => 12,
        CropType::Coffee => 10,
        CropType::Tea => 20,
        CropType::Potato => 25,
        CropType::Tomato => 30,
    }
}

/// Optimal mean temperature range in °C, inclusive
pub fn optimal_temperature(crop_type: CropType) -> (f64, f64) {
    match crop_type {
        CropType::Maize => (18.0, 30.0),
        CropType::Beans => (15.0, 27.0),
        CropType::Wheat => (12.0, 25.0),
        CropType::Coffee => (15.0, 24.0),
        CropType::Tea => (13.0, 30.0),
        CropType::Potato => (15.0, 20.0),
        CropType::Tomato => (18.0, 27.0),
    }
}

/// Optimal total rainfall range in mm over the sampled window, inclusive
pub fn optimal_rainfall(crop_type: CropType) -> (f64, f64) {
    match crop_type {
        CropType::Maize => (500.0, 800.0),
        CropType::Beans => (400.0, 600.0),
        CropType::Wheat => (450.0, 650.0),
        CropType::Coffee => (1000.0, 1500.0),
        CropType::Tea => (1200.0, 1800.0),
        CropType::Potato => (500.0, 700.0),
        CropType::Tomato => (400.0, 600.0),
    }
}

/// Yield multiplier for the crop's growth stage
pub fn stage_multiplier(stage: GrowthStage) -> f64 {
    match stage {
        GrowthStage::Germination => 0.9,
        GrowthStage::Vegetative => 1.0,
        GrowthStage::Flowering => 1.1,
        GrowthStage::Fruiting => 1.15,
        GrowthStage::Maturity => 1.2,
        GrowthStage::Harvest => 1.0,
    }
}

/// Aggregates over a set of weather samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherAggregate {
    pub sample_count: usize,
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    pub total_rainfall: f64,
    /// Sample standard deviation; `None` with fewer than two samples
    pub temperature_stddev: Option<f64>,
}

impl WeatherAggregate {
    /// `None` for an empty slice
    pub fn from_samples(samples: &[WeatherSample]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let n = samples.len() as f64;
        let temperatures: Vec<f64> = samples.iter().map(|s| to_f64(s.temperature)).collect();
        let avg_temperature = temperatures.iter().sum::<f64>() / n;
        let avg_humidity = samples.iter().map(|s| to_f64(s.humidity)).sum::<f64>() / n;
        let total_rainfall = samples.iter().map(|s| to_f64(s.rainfall)).sum::<f64>();

        let temperature_stddev = (samples.len() > 1).then(|| {
            let variance = temperatures
                .iter()
                .map(|t| (t - avg_temperature).powi(2))
                .sum::<f64>()
                / (n - 1.0);
            variance.sqrt()
        });

        Some(Self {
            sample_count: samples.len(),
            avg_temperature,
            avg_humidity,
            total_rainfall,
            temperature_stddev,
        })
    }
}

/// Temperature factor, with a penalty for unstable temperatures
pub fn temperature_factor(crop_type: CropType, avg_temp: f64, stddev: Option<f64>) -> f64 {
    let (min, max) = optimal_temperature(crop_type);
    let mut factor = if (min..=max).contains(&avg_temp) {
        1.0
    } else {
        let deviation = (avg_temp - min).abs().min((avg_temp - max).abs());
        (1.0 - deviation * 0.05).max(0.5)
    };

    if let Some(stddev) = stddev {
        if stddev > TEMPERATURE_STRESS_STDDEV {
            factor *= (1.0 - (stddev - TEMPERATURE_STRESS_STDDEV) * 0.02).max(0.8);
        }
    }
    factor
}

pub fn rainfall_factor(crop_type: CropType, total_rainfall: f64) -> f64 {
    let (min, max) = optimal_rainfall(crop_type);
    if (min..=max).contains(&total_rainfall) {
        1.0
    } else if total_rainfall < min {
        (total_rainfall / min).max(0.4)
    } else {
        (1.0 - (total_rainfall - max) / max).max(0.6)
    }
}

pub fn humidity_factor(avg_humidity: f64) -> f64 {
    let (min, max) = HUMIDITY_RANGE;
    if (min..=max).contains(&avg_humidity) {
        1.0
    } else if avg_humidity < min {
        (avg_humidity / min).max(0.6)
    } else {
        (1.0 - (avg_humidity - max) / 100.0).max(0.7)
    }
}

/// Weighted factor combination scaled by the stage multiplier
pub fn combined_factor(temperature: f64, rainfall: f64, humidity: f64, stage: f64) -> f64 {
    (temperature * TEMPERATURE_WEIGHT + rainfall * RAINFALL_WEIGHT + humidity * HUMIDITY_WEIGHT)
        * stage
}

/// Confidence from data coverage and factor quality, clamped to [30, 95]
pub fn confidence_score(sample_count: usize, combined: f64) -> f64 {
    let data_quality = (sample_count as f64 / FULL_DATA_DAYS * 100.0).min(100.0);
    let factor_quality = combined * 100.0;
    (data_quality * 0.6 + factor_quality * 0.4).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

/// Output of a single prediction
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YieldEstimate {
    /// Bags
    pub predicted_yield: Decimal,
    pub confidence_score: Decimal,
    pub factors: PredictionFactors,
}

impl YieldEstimate {
    /// Record this estimate as a prediction for `crop_id` made on `today`
    pub fn into_prediction(self, crop_id: Uuid, today: NaiveDate) -> YieldPrediction {
        YieldPrediction {
            crop_id,
            predicted_yield: self.predicted_yield,
            confidence_score: self.confidence_score,
            factors: self.factors,
            prediction_date: today,
            actual_yield: None,
        }
    }
}

/// Yield prediction service
#[derive(Debug, Clone, Copy, Default)]
pub struct YieldPredictionService;

impl YieldPredictionService {
    pub fn new() -> Self {
        Self
    }

    /// Predict yield for a crop from the weather recorded over its season
    pub fn predict_yield(&self, crop: &CropSnapshot, weather: &[WeatherSample]) -> YieldEstimate {
        let base = base_yield_per_acre(crop.crop_type);

        let Some(aggregate) = WeatherAggregate::from_samples(weather) else {
            tracing::warn!(
                "No weather data for {} crop {}, using base yield",
                crop.crop_type,
                crop.id
            );
            return YieldEstimate {
                predicted_yield: Decimal::from(base) * crop.area_planted,
                confidence_score: to_decimal(MIN_CONFIDENCE, 2),
                factors: PredictionFactors::unknown(),
            };
        };

        let temp = temperature_factor(
            crop.crop_type,
            aggregate.avg_temperature,
            aggregate.temperature_stddev,
        );
        let rain = rainfall_factor(crop.crop_type, aggregate.total_rainfall);
        let humidity = humidity_factor(aggregate.avg_humidity);
        let stage = stage_multiplier(crop.current_stage);
        let combined = combined_factor(temp, rain, humidity, stage);

        let total = f64::from(base) * combined * to_f64(crop.area_planted);
        let confidence = confidence_score(aggregate.sample_count, combined);

        tracing::debug!(
            "{} crop {}: temp {:.2}, rain {:.2}, humidity {:.2}, stage {:.2} -> {:.4}",
            crop.crop_type,
            crop.id,
            temp,
            rain,
            humidity,
            stage,
            combined
        );

        YieldEstimate {
            predicted_yield: to_decimal(total, 2),
            confidence_score: to_decimal(confidence, 2),
            factors: PredictionFactors {
                temperature: Some(temp),
                rainfall: Some(rain),
                humidity: Some(humidity),
                stage_bonus: Some(stage),
            },
        }
    }

    /// Stage implied by days since planting as of `today`
    pub fn update_crop_stage(&self, crop: &CropSnapshot, today: NaiveDate) -> GrowthStage {
        GrowthStage::for_days(crop.crop_type, crop.days_since_planting(today))
    }

    /// A crop needs a fresh prediction when it has none or the latest is stale
    pub fn needs_new_prediction(
        &self,
        latest: Option<&YieldPrediction>,
        today: NaiveDate,
        max_age_days: i64,
    ) -> bool {
        latest.map_or(true, |p| p.is_stale(today, max_age_days))
    }
}
