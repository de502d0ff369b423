//! Farm analytics: aggregates over crops, weather, alerts and predictions

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use shared::{
    to_decimal, to_f64, Alert, AlertType, CropSnapshot, CropType, DateRange, GrowthStage,
    IrrigationFrequency, RainfallTrend, Severity, TemperatureTrend, WeatherSample, YieldPrediction,
};

/// Samples compared at each end of the window for the temperature trend
const TREND_SAMPLES: usize = 7;
/// Mean temperature change (°C) that counts as a trend
const TREND_THRESHOLD: f64 = 2.0;

/// Crop counts and area for a farm
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CropPerformance {
    pub total_crops: usize,
    pub active_crops: usize,
    pub harvested_crops: usize,
    pub total_area: Decimal,
    pub crops_by_type: BTreeMap<CropType, usize>,
    /// Active crops only
    pub crops_by_stage: BTreeMap<GrowthStage, usize>,
    pub average_growth_days: i64,
}

/// Weather statistics over a trailing window
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeatherTrends {
    pub avg_temperature: f64,
    pub max_temperature: f64,
    pub min_temperature: f64,
    pub avg_humidity: f64,
    pub total_rainfall: f64,
    pub rainy_days: usize,
    pub records_count: usize,
    pub temperature_trend: TemperatureTrend,
    pub rainfall_trend: RainfallTrend,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YieldSummary {
    pub total_predicted_yield: Decimal,
    pub average_confidence: Decimal,
    pub predictions_count: usize,
    pub crops_with_predictions: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AlertSummary {
    pub total_alerts: usize,
    pub unread_alerts: usize,
    pub critical_alerts: usize,
    pub high_alerts: usize,
    /// Every alert type, including those with no alerts
    pub alerts_by_type: BTreeMap<AlertType, usize>,
}

/// Weekly irrigation advice for one crop
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IrrigationRecommendation {
    pub crop_type: CropType,
    /// mm
    pub weekly_water_need: Decimal,
    pub rainfall_received: Decimal,
    pub water_deficit: Decimal,
    pub irrigation_needed: bool,
    pub irrigation_amount: Decimal,
    pub frequency: IrrigationFrequency,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeatherSummary {
    pub avg_temperature: Decimal,
    pub avg_humidity: Decimal,
    pub total_rainfall: Decimal,
    pub days_recorded: usize,
}

/// Dashboard statistics for a farm's active crops
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FarmStatistics {
    pub total_crops: usize,
    pub total_area_planted: Decimal,
    pub crops_by_stage: BTreeMap<GrowthStage, usize>,
    pub crops_by_type: BTreeMap<CropType, usize>,
    pub weather_summary: Option<WeatherSummary>,
    pub predicted_total_yield: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CropRecommendation {
    pub crop: CropType,
    pub reason: &'static str,
    pub confidence: &'static str,
}

/// Daily crop water requirement in mm
pub fn daily_water_need(crop_type: CropType) -> f64 {
    match crop_type {
        CropType::Maize => 5.0,
        CropType::Beans => 4.0,
        CropType::Wheat => 4.5,
        CropType::Coffee => 6.0,
        CropType::Tea => 5.5,
        CropType::Potato => 5.0,
        CropType::Tomato => 6.0,
    }
}

/// Most recent prediction for a crop
pub fn latest_prediction(
    predictions: &[YieldPrediction],
    crop_id: Uuid,
) -> Option<&YieldPrediction> {
    predictions
        .iter()
        .filter(|p| p.crop_id == crop_id)
        .max_by_key(|p| p.prediction_date)
}

/// Samples inside the trailing window, oldest first
fn window(weather: &[WeatherSample], today: NaiveDate, days: i64) -> Vec<&WeatherSample> {
    let range = DateRange::trailing_days(today, days);
    let mut samples: Vec<&WeatherSample> =
        weather.iter().filter(|s| range.contains(s.date)).collect();
    samples.sort_by_key(|s| s.date);
    samples
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn count_by<K: Ord, I: Iterator<Item = K>>(keys: I) -> BTreeMap<K, usize> {
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Farm analytics service
#[derive(Debug, Clone, Copy, Default)]
pub struct FarmAnalytics;

impl FarmAnalytics {
    pub fn new() -> Self {
        Self
    }

    pub fn crop_performance(&self, crops: &[CropSnapshot], today: NaiveDate) -> CropPerformance {
        let active: Vec<&CropSnapshot> = crops.iter().filter(|c| c.is_active).collect();

        let average_growth_days = if active.is_empty() {
            0
        } else {
            let total: i64 = active.iter().map(|c| c.days_since_planting(today)).sum();
            total.div_euclid(active.len() as i64)
        };

        CropPerformance {
            total_crops: crops.len(),
            active_crops: active.len(),
            harvested_crops: crops.iter().filter(|c| c.is_harvested()).count(),
            total_area: crops.iter().map(|c| c.area_planted).sum(),
            crops_by_type: count_by(crops.iter().map(|c| c.crop_type)),
            crops_by_stage: count_by(active.iter().map(|c| c.current_stage)),
            average_growth_days,
        }
    }

    /// Weather statistics over the last `days` days; `None` without samples
    pub fn weather_trends(
        &self,
        weather: &[WeatherSample],
        today: NaiveDate,
        days: i64,
    ) -> Option<WeatherTrends> {
        let samples = window(weather, today, days);
        if samples.is_empty() {
            return None;
        }

        let temps: Vec<f64> = samples.iter().map(|s| to_f64(s.temperature)).collect();
        let humidity: Vec<f64> = samples.iter().map(|s| to_f64(s.humidity)).collect();
        let rainfall: Vec<f64> = samples.iter().map(|s| to_f64(s.rainfall)).collect();
        let total_rainfall: f64 = rainfall.iter().sum();

        let mut temperature_trend = TemperatureTrend::Stable;
        if temps.len() >= TREND_SAMPLES {
            let recent = mean(&temps[temps.len() - TREND_SAMPLES..]);
            let older = mean(&temps[..TREND_SAMPLES]);
            if recent > older + TREND_THRESHOLD {
                temperature_trend = TemperatureTrend::Rising;
            } else if recent < older - TREND_THRESHOLD {
                temperature_trend = TemperatureTrend::Falling;
            }
        }

        Some(WeatherTrends {
            avg_temperature: mean(&temps),
            max_temperature: temps.iter().copied().fold(f64::MIN, f64::max),
            min_temperature: temps.iter().copied().fold(f64::MAX, f64::min),
            avg_humidity: mean(&humidity),
            total_rainfall,
            rainy_days: rainfall.iter().filter(|r| **r > 0.0).count(),
            records_count: samples.len(),
            temperature_trend,
            rainfall_trend: RainfallTrend::from_total(total_rainfall),
        })
    }

    /// Totals over the predictions of active crops; `None` when there are none
    pub fn yield_predictions_summary(
        &self,
        crops: &[CropSnapshot],
        predictions: &[YieldPrediction],
    ) -> Option<YieldSummary> {
        let active: HashSet<Uuid> = crops.iter().filter(|c| c.is_active).map(|c| c.id).collect();
        let relevant: Vec<&YieldPrediction> = predictions
            .iter()
            .filter(|p| active.contains(&p.crop_id))
            .collect();
        if relevant.is_empty() {
            return None;
        }

        let total: Decimal = relevant.iter().map(|p| p.predicted_yield).sum();
        let confidence: Decimal = relevant.iter().map(|p| p.confidence_score).sum();
        let count = relevant.len();
        let crops_with_predictions = relevant
            .iter()
            .map(|p| p.crop_id)
            .collect::<HashSet<_>>()
            .len();

        Some(YieldSummary {
            total_predicted_yield: total,
            average_confidence: (confidence / Decimal::from(count)).round_dp(2),
            predictions_count: count,
            crops_with_predictions,
        })
    }

    pub fn alert_summary(&self, alerts: &[Alert]) -> AlertSummary {
        let mut alerts_by_type: BTreeMap<AlertType, usize> =
            AlertType::ALL.iter().map(|t| (*t, 0)).collect();
        for alert in alerts {
            *alerts_by_type.entry(alert.alert_type).or_insert(0) += 1;
        }

        AlertSummary {
            total_alerts: alerts.len(),
            unread_alerts: alerts.iter().filter(|a| !a.is_read).count(),
            critical_alerts: alerts.iter().filter(|a| a.severity == Severity::Critical).count(),
            high_alerts: alerts.iter().filter(|a| a.severity == Severity::High).count(),
            alerts_by_type,
        }
    }

    /// Irrigation advice from the last `days` days of weather; `None` without samples
    pub fn irrigation_recommendation(
        &self,
        crop_type: CropType,
        weather: &[WeatherSample],
        today: NaiveDate,
        days: i64,
    ) -> Option<IrrigationRecommendation> {
        let samples = window(weather, today, days);
        if samples.is_empty() {
            return None;
        }

        let total_rainfall: f64 = samples.iter().map(|s| to_f64(s.rainfall)).sum();
        let temps: Vec<f64> = samples.iter().map(|s| to_f64(s.temperature)).collect();
        let humidity: Vec<f64> = samples.iter().map(|s| to_f64(s.humidity)).collect();
        let avg_temp = mean(&temps);
        let avg_humidity = mean(&humidity);

        let mut weekly_need = daily_water_need(crop_type) * 7.0;
        if avg_temp > 30.0 {
            weekly_need *= 1.2;
        }
        if avg_humidity < 50.0 {
            weekly_need *= 1.1;
        }

        let deficit = weekly_need - total_rainfall;
        let shortfall = to_decimal(deficit.max(0.0), 2);

        tracing::debug!(
            "{} irrigation: need {:.2}mm, rain {:.2}mm, deficit {:.2}mm",
            crop_type,
            weekly_need,
            total_rainfall,
            deficit
        );

        Some(IrrigationRecommendation {
            crop_type,
            weekly_water_need: to_decimal(weekly_need, 2),
            rainfall_received: to_decimal(total_rainfall, 2),
            water_deficit: shortfall,
            irrigation_needed: deficit > 0.0,
            irrigation_amount: shortfall,
            frequency: IrrigationFrequency::from_deficit(deficit),
        })
    }

    pub fn farm_statistics(
        &self,
        crops: &[CropSnapshot],
        weather: &[WeatherSample],
        predictions: &[YieldPrediction],
        today: NaiveDate,
        window_days: i64,
    ) -> FarmStatistics {
        let active: Vec<&CropSnapshot> = crops.iter().filter(|c| c.is_active).collect();

        let samples = window(weather, today, window_days);
        let weather_summary = (!samples.is_empty()).then(|| {
            let temps: Vec<f64> = samples.iter().map(|s| to_f64(s.temperature)).collect();
            let humidity: Vec<f64> = samples.iter().map(|s| to_f64(s.humidity)).collect();
            let rainfall: Decimal = samples.iter().map(|s| s.rainfall).sum();
            WeatherSummary {
                avg_temperature: to_decimal(mean(&temps), 1),
                avg_humidity: to_decimal(mean(&humidity), 1),
                total_rainfall: rainfall.round_dp(1),
                days_recorded: samples.len(),
            }
        });

        let predicted_total_yield: Decimal = active
            .iter()
            .filter_map(|c| latest_prediction(predictions, c.id))
            .map(|p| p.predicted_yield)
            .sum();

        FarmStatistics {
            total_crops: active.len(),
            total_area_planted: active.iter().map(|c| c.area_planted).sum(),
            crops_by_stage: count_by(active.iter().map(|c| c.current_stage)),
            crops_by_type: count_by(active.iter().map(|c| c.crop_type)),
            weather_summary,
            predicted_total_yield: predicted_total_yield.round_dp(2),
        }
    }

    /// Crops suited to the mean conditions of the given samples
    pub fn crop_recommendations(
        &self,
        weather: &[WeatherSample],
        limit: usize,
    ) -> Vec<CropRecommendation> {
        if weather.is_empty() {
            return Vec::new();
        }

        let count = weather.len() as f64;
        let avg_temp = weather.iter().map(|s| to_f64(s.temperature)).sum::<f64>() / count;
        let avg_humidity = weather.iter().map(|s| to_f64(s.humidity)).sum::<f64>() / count;

        let by_temperature = [
            (CropType::Maize, 18.0, 30.0, "Optimal temperature range (18-30°C)"),
            (CropType::Beans, 15.0, 27.0, "Suitable temperature range (15-27°C)"),
            (CropType::Tomato, 18.0, 27.0, "Ideal temperature range (18-27°C)"),
            (CropType::Coffee, 15.0, 24.0, "Perfect temperature for coffee (15-24°C)"),
        ];

        let mut recommendations: Vec<CropRecommendation> = by_temperature
            .iter()
            .filter(|(_, min, max, _)| (*min..=*max).contains(&avg_temp))
            .map(|(crop, _, _, reason)| CropRecommendation {
                crop: *crop,
                reason: *reason,
                confidence: "High",
            })
            .collect();

        if avg_humidity > 70.0 {
            recommendations.push(CropRecommendation {
                crop: CropType::Tea,
                reason: "High humidity suitable for tea cultivation",
                confidence: "Medium",
            });
        }

        recommendations.truncate(limit);
        recommendations
    }
}
