//! Farm report integration tests
//!
//! Tests for:
//! - Stage refresh before scoring
//! - Prediction reuse and recomputation
//! - Location climate, soil and alert sections
//! - Report determinism

use chrono::{Duration, NaiveDate};
use climate_monitor_backend::services::ReportingService;
use climate_monitor_backend::{Config, FarmSnapshot};
use rust_decimal::Decimal;
use shared::{
    Alert, AlertType, CropSnapshot, CropType, CurrentWeather, Farm, GpsCoordinates, GrowthStage,
    PredictionFactors, Severity, SoilHealth, SoilSample, SoilType, WeatherSample, YieldPrediction,
};
use uuid::Uuid;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 10).unwrap()
}

fn farm() -> Farm {
    Farm {
        id: Uuid::new_v4(),
        name: "Lakeside Farm".to_string(),
        location: "Kisumu".to_string(),
        coordinates: Some(GpsCoordinates::new(dec("-0.1"), dec("34.75"))),
        size_acres: dec("10"),
        soil_type: SoilType::Loam,
    }
}

/// Ten days of steady weather: 24°C, 70% humidity, 650mm in total
fn steady_weather() -> Vec<WeatherSample> {
    (0..10)
        .map(|d| WeatherSample {
            date: today() - Duration::days(d),
            temperature: dec("24"),
            humidity: dec("70"),
            rainfall: dec("65"),
            wind_speed: None,
            description: None,
        })
        .collect()
}

fn maize(days_ago: i64) -> CropSnapshot {
    CropSnapshot {
        id: Uuid::new_v4(),
        crop_type: CropType::Maize,
        variety: Some("H614".to_string()),
        planting_date: today() - Duration::days(days_ago),
        expected_harvest_date: None,
        actual_harvest_date: None,
        area_planted: dec("5"),
        current_stage: GrowthStage::Germination,
        is_active: true,
    }
}

fn harvested_beans() -> CropSnapshot {
    CropSnapshot {
        id: Uuid::new_v4(),
        crop_type: CropType::Beans,
        variety: None,
        planting_date: today() - Duration::days(120),
        expected_harvest_date: None,
        actual_harvest_date: Some(today() - Duration::days(20)),
        area_planted: dec("2"),
        current_stage: GrowthStage::Harvest,
        is_active: false,
    }
}

fn stored_prediction(crop_id: Uuid, days_ago: i64) -> YieldPrediction {
    YieldPrediction {
        crop_id,
        predicted_yield: dec("70"),
        confidence_score: dec("55"),
        factors: PredictionFactors::unknown(),
        prediction_date: today() - Duration::days(days_ago),
        actual_yield: None,
    }
}

fn snapshot() -> FarmSnapshot {
    FarmSnapshot {
        farm: farm(),
        crops: vec![maize(65), harvested_beans()],
        weather: steady_weather(),
        soil_samples: vec![SoilSample {
            measurement_date: today() - Duration::days(30),
            ph_level: dec("6.5"),
            nitrogen: dec("40"),
            phosphorus: dec("45"),
            potassium: dec("70"),
            organic_matter: None,
            moisture: None,
            temperature: None,
        }],
        alerts: Vec::new(),
        predictions: Vec::new(),
        current_weather: Some(CurrentWeather {
            temperature: 25.0,
            humidity: 80.0,
            rainfall: 0.0,
        }),
    }
}

#[test]
fn test_report_refreshes_stage_and_predicts() {
    let report = ReportingService::default().farm_report(&snapshot(), today());

    assert_eq!(report.report_date, today());
    assert_eq!(report.farm_name, "Lakeside Farm");
    assert_eq!(report.crops.len(), 1);

    let crop = &report.crops[0];
    assert_eq!(crop.recorded_stage, GrowthStage::Germination);
    assert_eq!(crop.current_stage, GrowthStage::Flowering);
    assert_eq!(crop.days_since_planting, 65);
    assert!(!crop.needs_attention);

    assert!(crop.prediction_refreshed);
    assert_eq!(crop.prediction.predicted_yield, dec("82.5"));
    // 10/30 coverage: 33.33 * 0.6 + 110 * 0.4
    assert_eq!(crop.prediction.confidence_score, dec("64"));
    assert_eq!(crop.prediction.prediction_date, today());
}

#[test]
fn test_report_economics_in_kg() {
    let report = ReportingService::default().farm_report(&snapshot(), today());
    let crop = &report.crops[0];

    // 82.5 bags at 90kg
    assert_eq!(crop.revenue.predicted_yield_kg, dec("7425"));
    assert_eq!(crop.revenue.wholesale_revenue, dec("334125"));
    assert_eq!(crop.profitability.total_cost, dec("105000"));
    assert_eq!(crop.threats.len(), 3);
    assert_eq!(crop.soil_advice.last(), Some(&"Maize needs well-drained soil with pH 5.5-7.0"));
}

#[test]
fn test_fresh_prediction_reused() {
    let mut snap = snapshot();
    let crop_id = snap.crops[0].id;
    snap.predictions.push(stored_prediction(crop_id, 3));

    let report = ReportingService::default().farm_report(&snap, today());
    let crop = &report.crops[0];

    assert!(!crop.prediction_refreshed);
    assert_eq!(crop.prediction.predicted_yield, dec("70"));
    assert_eq!(report.statistics.predicted_total_yield, dec("70"));
}

#[test]
fn test_stale_prediction_recomputed() {
    let mut snap = snapshot();
    let crop_id = snap.crops[0].id;
    snap.predictions.push(stored_prediction(crop_id, 10));

    let report = ReportingService::default().farm_report(&snap, today());

    assert!(report.crops[0].prediction_refreshed);
    assert_eq!(report.crops[0].prediction.predicted_yield, dec("82.5"));
    assert_eq!(report.statistics.predicted_total_yield, dec("82.5"));
    // Both the stale and the fresh prediction count toward the summary
    assert_eq!(report.yield_summary.unwrap().predictions_count, 2);
}

#[test]
fn test_prediction_age_limit_is_configurable() {
    let mut snap = snapshot();
    let crop_id = snap.crops[0].id;
    snap.predictions.push(stored_prediction(crop_id, 10));

    let mut config = Config::default();
    config.analysis.prediction_max_age_days = 14;
    let report = ReportingService::new(config).farm_report(&snap, today());

    assert!(!report.crops[0].prediction_refreshed);
}

#[test]
fn test_farm_sections() {
    let report = ReportingService::default().farm_report(&snapshot(), today());

    let climate = report.climate.unwrap();
    assert_eq!(climate.climate.climate_code, "Aw");
    assert_eq!(report.climate_zone.unwrap().zone, "Tropical Zone");

    let soil = report.soil.unwrap();
    assert_eq!(soil.overall_health, SoilHealth::Excellent);
    assert_eq!(soil.recommendations, vec!["Ideal soil! Maintain organic matter levels"]);

    assert_eq!(report.performance.total_crops, 2);
    assert_eq!(report.performance.harvested_crops, 1);
    assert_eq!(report.statistics.total_crops, 1);

    let trends = report.weather_trends.unwrap();
    assert_eq!(trends.records_count, 10);
    assert_eq!(trends.total_rainfall, 650.0);

    let picks: Vec<CropType> = report.crop_recommendations.iter().map(|r| r.crop).collect();
    assert_eq!(
        picks,
        vec![CropType::Maize, CropType::Beans, CropType::Tomato, CropType::Coffee]
    );
    assert_eq!(report.best_crops[0].crop, CropType::Coffee);
}

#[test]
fn test_climate_needs_coordinates_and_current_weather() {
    let mut no_weather = snapshot();
    no_weather.current_weather = None;
    let report = ReportingService::default().farm_report(&no_weather, today());
    assert!(report.climate.is_none());
    assert!(report.climate_zone.is_some());

    let mut no_coordinates = snapshot();
    no_coordinates.farm.coordinates = None;
    let report = ReportingService::default().farm_report(&no_coordinates, today());
    assert!(report.climate.is_none());
    assert!(report.climate_zone.is_none());
}

#[test]
fn test_alerts_use_refreshed_stage() {
    // Recorded as germinating after 65 days, but the refreshed stage is flowering
    let report = ReportingService::default().farm_report(&snapshot(), today());
    assert!(report.new_alerts.is_empty());
    assert_eq!(report.alert_summary.total_alerts, 0);
}

#[test]
fn test_weather_alert_and_existing_alerts() {
    let mut snap = snapshot();
    snap.weather[0].temperature = dec("37");

    let report = ReportingService::default().farm_report(&snap, today());
    assert_eq!(report.new_alerts.len(), 1);
    assert_eq!(report.new_alerts[0].title, "High Temperature Alert");
    assert_eq!(report.alert_summary.high_alerts, 1);

    snap.alerts.push(Alert::new(
        snap.farm.id,
        AlertType::Weather,
        Severity::High,
        "High Temperature Alert",
        "Temperature is 36°C. Consider irrigation and shade for sensitive crops.",
    ));
    let report = ReportingService::default().farm_report(&snap, today());
    assert!(report.new_alerts.is_empty());
    assert_eq!(report.alert_summary.total_alerts, 1);
}

#[test]
fn test_no_weather_history() {
    let mut snap = snapshot();
    snap.weather.clear();

    let report = ReportingService::default().farm_report(&snap, today());
    let crop = &report.crops[0];

    assert_eq!(crop.prediction.predicted_yield, dec("75"));
    assert_eq!(crop.prediction.confidence_score, dec("30"));
    assert!(crop.irrigation.is_none());
    assert!(report.weather_trends.is_none());
    assert!(report.crop_recommendations.is_empty());
}

#[test]
fn test_report_is_deterministic() {
    let snap = snapshot();
    let service = ReportingService::default();

    let first = serde_json::to_string(&service.farm_report(&snap, today())).unwrap();
    let second = serde_json::to_string(&service.farm_report(&snap, today())).unwrap();
    assert_eq!(first, second);
}
