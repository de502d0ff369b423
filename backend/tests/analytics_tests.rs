//! Farm analytics integration tests
//!
//! Tests for:
//! - Weather trends and the trailing window
//! - Irrigation requirements and frequency thresholds
//! - Crop, yield and alert summaries
//! - Temperature-based crop recommendations

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use climate_monitor_backend::services::analytics::{latest_prediction, FarmAnalytics};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    Alert, AlertType, CropSnapshot, CropType, GrowthStage, IrrigationFrequency, PredictionFactors,
    RainfallTrend, Severity, TemperatureTrend, WeatherSample, YieldPrediction,
};
use uuid::Uuid;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()
}

fn sample(days_ago: i64, temperature: &str, humidity: &str, rainfall: &str) -> WeatherSample {
    WeatherSample {
        date: today() - Duration::days(days_ago),
        temperature: dec(temperature),
        humidity: dec(humidity),
        rainfall: dec(rainfall),
        wind_speed: None,
        description: None,
    }
}

fn crop(crop_type: CropType, stage: GrowthStage, days_ago: i64, active: bool) -> CropSnapshot {
    CropSnapshot {
        id: Uuid::new_v4(),
        crop_type,
        variety: None,
        planting_date: today() - Duration::days(days_ago),
        expected_harvest_date: None,
        actual_harvest_date: (!active).then(|| today() - Duration::days(5)),
        area_planted: dec("2.5"),
        current_stage: stage,
        is_active: active,
    }
}

fn prediction(crop_id: Uuid, days_ago: i64, bags: &str, confidence: &str) -> YieldPrediction {
    YieldPrediction {
        crop_id,
        predicted_yield: dec(bags),
        confidence_score: dec(confidence),
        factors: PredictionFactors::unknown(),
        prediction_date: today() - Duration::days(days_ago),
        actual_yield: None,
    }
}

/// One sample per day for the last week, rain falling on the oldest day
fn dry_week(temperature: &str, humidity: &str, rainfall: &str) -> Vec<WeatherSample> {
    (0..7)
        .map(|d| sample(d, temperature, humidity, if d == 6 { rainfall } else { "0" }))
        .collect()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_rising_temperature_trend() {
        let weather: Vec<WeatherSample> = (0..14)
            .map(|d| sample(d, if d < 7 { "25" } else { "20" }, "60", "0"))
            .collect();

        let trends = FarmAnalytics::new().weather_trends(&weather, today(), 30).unwrap();

        assert_eq!(trends.temperature_trend, TemperatureTrend::Rising);
        assert_eq!(trends.rainfall_trend, RainfallTrend::Drought);
        assert_eq!(trends.records_count, 14);
        assert_eq!(trends.max_temperature, 25.0);
        assert_eq!(trends.min_temperature, 20.0);
        assert_eq!(trends.avg_temperature, 22.5);
        assert_eq!(trends.rainy_days, 0);
    }

    #[test]
    fn test_falling_temperature_trend() {
        let weather: Vec<WeatherSample> = (0..14)
            .map(|d| sample(d, if d < 7 { "18" } else { "24" }, "60", "5"))
            .collect();

        let trends = FarmAnalytics::new().weather_trends(&weather, today(), 30).unwrap();

        assert_eq!(trends.temperature_trend, TemperatureTrend::Falling);
        assert_eq!(trends.total_rainfall, 70.0);
        assert_eq!(trends.rainfall_trend, RainfallTrend::Normal);
        assert_eq!(trends.rainy_days, 14);
    }

    #[test]
    fn test_two_degree_change_is_stable() {
        let weather: Vec<WeatherSample> = (0..14)
            .map(|d| sample(d, if d < 7 { "22" } else { "20" }, "60", "0"))
            .collect();

        let trends = FarmAnalytics::new().weather_trends(&weather, today(), 30).unwrap();
        assert_eq!(trends.temperature_trend, TemperatureTrend::Stable);
    }

    #[test]
    fn test_short_window_is_stable() {
        let weather: Vec<WeatherSample> =
            (0..6).map(|d| sample(d, if d < 3 { "30" } else { "10" }, "60", "0")).collect();
        let trends = FarmAnalytics::new().weather_trends(&weather, today(), 30).unwrap();
        assert_eq!(trends.temperature_trend, TemperatureTrend::Stable);
    }

    #[test]
    fn test_heavy_rainfall_trend() {
        let weather: Vec<WeatherSample> = (0..10).map(|d| sample(d, "22", "80", "25")).collect();
        let trends = FarmAnalytics::new().weather_trends(&weather, today(), 30).unwrap();
        assert_eq!(trends.rainfall_trend, RainfallTrend::Heavy);
    }

    #[test]
    fn test_trends_ignore_samples_outside_window() {
        let analytics = FarmAnalytics::new();
        let old = vec![sample(45, "22", "60", "0")];
        assert!(analytics.weather_trends(&old, today(), 30).is_none());
        assert!(analytics.weather_trends(&[], today(), 30).is_none());

        // Future-dated samples are not part of the window
        let future = vec![sample(-3, "22", "60", "0"), sample(0, "20", "60", "0")];
        let trends = analytics.weather_trends(&future, today(), 30).unwrap();
        assert_eq!(trends.records_count, 1);
    }

    #[test]
    fn test_irrigation_daily_when_dry() {
        let rec = FarmAnalytics::new()
            .irrigation_recommendation(CropType::Maize, &dry_week("25", "60", "0"), today(), 7)
            .unwrap();

        assert_eq!(rec.weekly_water_need, dec("35"));
        assert_eq!(rec.rainfall_received, Decimal::ZERO);
        assert_eq!(rec.water_deficit, dec("35"));
        assert!(rec.irrigation_needed);
        assert_eq!(rec.irrigation_amount, dec("35"));
        assert_eq!(rec.frequency, IrrigationFrequency::Daily);
    }

    #[test]
    fn test_irrigation_frequency_boundaries() {
        let analytics = FarmAnalytics::new();

        // Deficit of exactly 20mm
        let twenty = analytics
            .irrigation_recommendation(CropType::Maize, &dry_week("25", "60", "15"), today(), 7)
            .unwrap();
        assert_eq!(twenty.water_deficit, dec("20"));
        assert_eq!(twenty.frequency, IrrigationFrequency::EveryTwoToThreeDays);

        // Deficit of exactly 10mm
        let ten = analytics
            .irrigation_recommendation(CropType::Maize, &dry_week("25", "60", "25"), today(), 7)
            .unwrap();
        assert_eq!(ten.water_deficit, dec("10"));
        assert!(ten.irrigation_needed);
        assert_eq!(ten.frequency, IrrigationFrequency::Weekly);
    }

    #[test]
    fn test_irrigation_surplus() {
        let rec = FarmAnalytics::new()
            .irrigation_recommendation(CropType::Maize, &dry_week("25", "60", "40"), today(), 7)
            .unwrap();

        assert_eq!(rec.water_deficit, Decimal::ZERO);
        assert_eq!(rec.irrigation_amount, Decimal::ZERO);
        assert!(!rec.irrigation_needed);
        assert_eq!(rec.frequency, IrrigationFrequency::Weekly);
    }

    #[test]
    fn test_irrigation_hot_dry_multipliers() {
        // 35 * 1.2 * 1.1
        let rec = FarmAnalytics::new()
            .irrigation_recommendation(CropType::Maize, &dry_week("32", "40", "0"), today(), 7)
            .unwrap();
        assert_eq!(rec.weekly_water_need, dec("46.2"));
    }

    #[test]
    fn test_irrigation_needs_recent_weather() {
        let old = vec![sample(20, "25", "60", "0")];
        assert!(FarmAnalytics::new()
            .irrigation_recommendation(CropType::Beans, &old, today(), 7)
            .is_none());
    }

    #[test]
    fn test_crop_performance() {
        let crops = vec![
            crop(CropType::Maize, GrowthStage::Flowering, 65, true),
            crop(CropType::Beans, GrowthStage::Vegetative, 20, true),
            crop(CropType::Maize, GrowthStage::Harvest, 130, false),
        ];

        let perf = FarmAnalytics::new().crop_performance(&crops, today());

        assert_eq!(perf.total_crops, 3);
        assert_eq!(perf.active_crops, 2);
        assert_eq!(perf.harvested_crops, 1);
        assert_eq!(perf.total_area, dec("7.5"));
        assert_eq!(perf.crops_by_type.get(&CropType::Maize), Some(&2));
        assert_eq!(perf.crops_by_stage.get(&GrowthStage::Harvest), None);
        // (65 + 20) / 2, floored
        assert_eq!(perf.average_growth_days, 42);
    }

    #[test]
    fn test_crop_performance_empty() {
        let perf = FarmAnalytics::new().crop_performance(&[], today());
        assert_eq!(perf.average_growth_days, 0);
        assert_eq!(perf.total_area, Decimal::ZERO);
    }

    #[test]
    fn test_yield_summary() {
        let maize = crop(CropType::Maize, GrowthStage::Flowering, 65, true);
        let beans = crop(CropType::Beans, GrowthStage::Vegetative, 20, true);
        let harvested = crop(CropType::Tea, GrowthStage::Harvest, 200, false);
        let predictions = vec![
            prediction(maize.id, 10, "50", "40"),
            prediction(maize.id, 2, "60", "60"),
            prediction(beans.id, 1, "20", "80"),
            prediction(harvested.id, 1, "500", "90"),
        ];
        let crops = vec![maize, beans, harvested];

        let analytics = FarmAnalytics::new();
        let summary = analytics.yield_predictions_summary(&crops, &predictions).unwrap();

        assert_eq!(summary.total_predicted_yield, dec("130"));
        assert_eq!(summary.average_confidence, dec("60"));
        assert_eq!(summary.predictions_count, 3);
        assert_eq!(summary.crops_with_predictions, 2);

        assert!(analytics.yield_predictions_summary(&crops, &[]).is_none());
    }

    #[test]
    fn test_latest_prediction_by_date() {
        let crop_id = Uuid::new_v4();
        let predictions = vec![
            prediction(crop_id, 2, "60", "60"),
            prediction(crop_id, 10, "50", "40"),
            prediction(Uuid::new_v4(), 0, "99", "90"),
        ];
        let latest = latest_prediction(&predictions, crop_id).unwrap();
        assert_eq!(latest.predicted_yield, dec("60"));
        assert!(latest_prediction(&predictions, Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_farm_statistics() {
        let maize = crop(CropType::Maize, GrowthStage::Flowering, 65, true);
        let beans = crop(CropType::Beans, GrowthStage::Vegetative, 20, true);
        let harvested = crop(CropType::Tea, GrowthStage::Harvest, 200, false);
        let predictions = vec![
            prediction(maize.id, 10, "50", "40"),
            prediction(maize.id, 2, "60", "60"),
            prediction(beans.id, 1, "20", "80"),
            prediction(harvested.id, 1, "500", "90"),
        ];
        let crops = vec![maize, beans, harvested];
        let weather = vec![
            sample(0, "20", "60", "1.25"),
            sample(1, "21", "65", "2.5"),
            sample(2, "21", "61", "0"),
            sample(60, "40", "10", "100"),
        ];

        let stats =
            FarmAnalytics::new().farm_statistics(&crops, &weather, &predictions, today(), 30);

        assert_eq!(stats.total_crops, 2);
        assert_eq!(stats.total_area_planted, dec("5"));
        assert_eq!(stats.predicted_total_yield, dec("80"));
        let summary = stats.weather_summary.unwrap();
        assert_eq!(summary.days_recorded, 3);
        assert_eq!(summary.avg_temperature, dec("20.7"));
        assert_eq!(summary.avg_humidity, dec("62"));
        assert_eq!(summary.total_rainfall, dec("3.8"));
    }

    #[test]
    fn test_alert_summary_lists_every_type() {
        let farm = Uuid::new_v4();
        let mut read =
            Alert::new(farm, AlertType::Weather, Severity::High, "High Temperature Alert", "");
        read.is_read = true;
        let alerts = vec![
            read,
            Alert::new(farm, AlertType::Weather, Severity::Medium, "Low Temperature Alert", ""),
            Alert::new(farm, AlertType::Disease, Severity::Critical, "Late Blight", ""),
        ];

        let summary = FarmAnalytics::new().alert_summary(&alerts);

        assert_eq!(summary.total_alerts, 3);
        assert_eq!(summary.unread_alerts, 2);
        assert_eq!(summary.critical_alerts, 1);
        assert_eq!(summary.high_alerts, 1);
        let expected: BTreeMap<AlertType, usize> = [
            (AlertType::Weather, 2),
            (AlertType::Pest, 0),
            (AlertType::Disease, 1),
            (AlertType::Irrigation, 0),
            (AlertType::Harvest, 0),
        ]
        .into_iter()
        .collect();
        assert_eq!(summary.alerts_by_type, expected);
    }

    #[test]
    fn test_crop_recommendations() {
        let analytics = FarmAnalytics::new();
        let mild_humid: Vec<WeatherSample> = (0..5).map(|d| sample(d, "20", "75", "2")).collect();

        let all = analytics.crop_recommendations(&mild_humid, 10);
        let crops: Vec<CropType> = all.iter().map(|r| r.crop).collect();
        assert_eq!(
            crops,
            vec![
                CropType::Maize,
                CropType::Beans,
                CropType::Tomato,
                CropType::Coffee,
                CropType::Tea
            ]
        );
        assert_eq!(all[4].confidence, "Medium");
        assert_eq!(all[0].reason, "Optimal temperature range (18-30°C)");

        assert_eq!(analytics.crop_recommendations(&mild_humid, 3).len(), 3);

        let hot_dry: Vec<WeatherSample> = (0..5).map(|d| sample(d, "28", "50", "0")).collect();
        let hot = analytics.crop_recommendations(&hot_dry, 5);
        assert_eq!(hot.len(), 1);
        assert_eq!(hot[0].crop, CropType::Maize);

        assert!(analytics.crop_recommendations(&[], 5).is_empty());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Rainfall 0.0 to 20.0 mm per day
    fn rainfall_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=200i64).prop_map(|n| Decimal::new(n, 1))
    }

    /// Temperatures 5.0 to 40.0°C
    fn temperature_strategy() -> impl Strategy<Value = Decimal> {
        (50i64..=400i64).prop_map(|n| Decimal::new(n, 1))
    }

    fn crop_type_strategy() -> impl Strategy<Value = CropType> {
        prop::sample::select(CropType::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Irrigation is needed exactly when the deficit is positive,
        /// and the recommended amount equals the deficit
        #[test]
        fn prop_irrigation_amount_matches_deficit(
            crop_type in crop_type_strategy(),
            temperature in temperature_strategy(),
            rains in prop::collection::vec(rainfall_strategy(), 1..=7)
        ) {
            let weather: Vec<WeatherSample> = rains
                .iter()
                .enumerate()
                .map(|(d, rain)| WeatherSample {
                    date: today() - Duration::days(d as i64),
                    temperature,
                    humidity: dec("60"),
                    rainfall: *rain,
                    wind_speed: None,
                    description: None,
                })
                .collect();

            let rec = FarmAnalytics::new()
                .irrigation_recommendation(crop_type, &weather, today(), 7)
                .unwrap();

            prop_assert_eq!(rec.irrigation_amount, rec.water_deficit);
            prop_assert!(rec.water_deficit >= Decimal::ZERO);
            if !rec.irrigation_needed {
                prop_assert_eq!(rec.water_deficit, Decimal::ZERO);
            }
        }

        /// Recommendations never exceed the limit
        #[test]
        fn prop_recommendations_respect_limit(
            temperature in temperature_strategy(),
            limit in 0usize..6
        ) {
            let weather = vec![WeatherSample {
                date: today(),
                temperature,
                humidity: dec("80"),
                rainfall: Decimal::ZERO,
                wind_speed: None,
                description: None,
            }];
            prop_assert!(FarmAnalytics::new().crop_recommendations(&weather, limit).len() <= limit);
        }
    }
}
