//! Farm advisory report assembled from every scoring service

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::config::Config;
use crate::services::alerts::{AlertContext, AlertService};
use crate::services::analytics::{
    latest_prediction, AlertSummary, CropPerformance, CropRecommendation, FarmAnalytics,
    FarmStatistics, IrrigationRecommendation, WeatherTrends, YieldSummary,
};
use crate::services::climate::{ClimateClassifier, ClimateZone, LocationClimate};
use crate::services::market::{CostCalculator, CropPick, MarketPriceService, Profitability, Revenue};
use crate::services::pests::{PestDiseaseDatabase, Threat};
use crate::services::prediction::YieldPredictionService;
use crate::services::soil::{SoilAnalysisService, SoilMeasurementAnalysis};
use crate::snapshot::FarmSnapshot;
use shared::{to_decimal, Alert, CropSnapshot, CropType, DateRange, GrowthStage, YieldPrediction};

/// Advice for one active crop
#[derive(Debug, Clone, Serialize)]
pub struct CropReport {
    pub crop_id: Uuid,
    pub crop_type: CropType,
    pub variety: Option<String>,
    pub recorded_stage: GrowthStage,
    pub current_stage: GrowthStage,
    pub days_since_planting: i64,
    pub growth_progress: i64,
    pub needs_attention: bool,
    pub prediction: YieldPrediction,
    /// True when the prediction was computed for this report
    pub prediction_refreshed: bool,
    pub revenue: Revenue,
    pub profitability: Profitability,
    pub irrigation: Option<IrrigationRecommendation>,
    pub soil_advice: Vec<&'static str>,
    pub threats: Vec<Threat>,
    pub prevention_tips: Vec<&'static str>,
}

/// Full advisory for one farm
#[derive(Debug, Clone, Serialize)]
pub struct FarmReport {
    pub farm_id: Uuid,
    pub farm_name: String,
    pub report_date: NaiveDate,
    pub crops: Vec<CropReport>,
    pub soil: Option<SoilMeasurementAnalysis>,
    pub climate: Option<LocationClimate>,
    pub climate_zone: Option<ClimateZone>,
    pub performance: CropPerformance,
    pub statistics: FarmStatistics,
    pub weather_trends: Option<WeatherTrends>,
    pub yield_summary: Option<YieldSummary>,
    pub crop_recommendations: Vec<CropRecommendation>,
    pub best_crops: Vec<CropPick>,
    pub alert_summary: AlertSummary,
    pub new_alerts: Vec<Alert>,
}

/// Builds farm reports
pub struct ReportingService {
    config: Config,
    climate: ClimateClassifier,
    soil: SoilAnalysisService,
    prediction: YieldPredictionService,
    analytics: FarmAnalytics,
    market: MarketPriceService,
    costs: CostCalculator,
    pests: PestDiseaseDatabase,
    alerts: AlertService,
}

impl ReportingService {
    pub fn new(config: Config) -> Self {
        let alerts = AlertService::new(&config.alerts);
        Self {
            config,
            climate: ClimateClassifier::new(),
            soil: SoilAnalysisService::new(),
            prediction: YieldPredictionService::new(),
            analytics: FarmAnalytics::new(),
            market: MarketPriceService::new(),
            costs: CostCalculator::new(),
            pests: PestDiseaseDatabase::new(),
            alerts,
        }
    }

    /// Build the advisory for `snapshot` as of `today`.
    ///
    /// The snapshot is not modified; refreshed stages and predictions are
    /// returned in the report.
    pub fn farm_report(&self, snapshot: &FarmSnapshot, today: NaiveDate) -> FarmReport {
        let analysis = &self.config.analysis;
        let farm = &snapshot.farm;
        tracing::info!("Building report for farm {} as of {}", farm.name, today);

        // Stage refresh applies to every active crop before anything is scored
        let crops: Vec<CropSnapshot> = snapshot
            .crops
            .iter()
            .map(|crop| {
                let mut crop = crop.clone();
                if crop.is_active {
                    crop.current_stage = self.prediction.update_crop_stage(&crop, today);
                }
                crop
            })
            .collect();

        let mut predictions = snapshot.predictions.clone();
        let mut crop_reports = Vec::new();

        for (recorded, crop) in snapshot.crops.iter().zip(&crops) {
            if !crop.is_active {
                continue;
            }
            let (prediction, refreshed) = self.current_prediction(snapshot, crop, today);
            if refreshed {
                predictions.push(prediction.clone());
            }
            crop_reports.push(
                self.crop_report(snapshot, recorded, crop, prediction, refreshed, today),
            );
        }

        let soil = snapshot
            .latest_soil_sample()
            .map(|sample| self.soil.analyze_measurement(sample, farm.soil_type, None));

        let climate_zone = farm
            .coordinates
            .as_ref()
            .map(|c| self.climate.climate_zone_by_latitude(c.latitude_f64()));
        let climate = match (&farm.coordinates, &snapshot.current_weather) {
            (Some(coordinates), Some(weather)) => Some(self.climate.analyze_location_climate(
                coordinates.latitude_f64(),
                coordinates.longitude_f64(),
                weather,
            )),
            _ => {
                tracing::debug!("Skipping location climate for farm {}", farm.name);
                None
            }
        };

        let ctx = AlertContext::new(farm.id, &snapshot.weather, &crops, today);
        let new_alerts = self.alerts.check_conditions(&ctx, &snapshot.alerts);
        let all_alerts: Vec<Alert> = snapshot.alerts.iter().chain(&new_alerts).cloned().collect();

        let trend_window = DateRange::trailing_days(today, analysis.trend_window_days);
        let recent: Vec<_> = snapshot
            .weather
            .iter()
            .filter(|s| trend_window.contains(s.date))
            .cloned()
            .collect();

        tracing::info!(
            "Report for farm {}: {} crops, {} new alerts",
            farm.name,
            crop_reports.len(),
            new_alerts.len()
        );

        FarmReport {
            farm_id: farm.id,
            farm_name: farm.name.clone(),
            report_date: today,
            soil,
            climate,
            climate_zone,
            performance: self.analytics.crop_performance(&crops, today),
            statistics: self.analytics.farm_statistics(
                &crops,
                &snapshot.weather,
                &predictions,
                today,
                analysis.trend_window_days,
            ),
            weather_trends: self.analytics.weather_trends(
                &snapshot.weather,
                today,
                analysis.trend_window_days,
            ),
            yield_summary: self.analytics.yield_predictions_summary(&crops, &predictions),
            crop_recommendations: self
                .analytics
                .crop_recommendations(&recent, analysis.recommendation_limit),
            best_crops: self.market.best_crops_to_plant(analysis.recommendation_limit),
            alert_summary: self.analytics.alert_summary(&all_alerts),
            new_alerts,
            crops: crop_reports,
        }
    }

    /// Latest stored prediction unless it is stale, otherwise a fresh one
    fn current_prediction(
        &self,
        snapshot: &FarmSnapshot,
        crop: &CropSnapshot,
        today: NaiveDate,
    ) -> (YieldPrediction, bool) {
        let latest = latest_prediction(&snapshot.predictions, crop.id);
        match latest {
            Some(p)
                if !self.prediction.needs_new_prediction(
                    Some(p),
                    today,
                    self.config.analysis.prediction_max_age_days,
                ) =>
            {
                (p.clone(), false)
            }
            _ => {
                if latest.is_some() {
                    tracing::warn!("Prediction for crop {} is stale, recomputing", crop.id);
                }
                let weather = snapshot.weather_since_planting(crop);
                let estimate = self.prediction.predict_yield(crop, &weather);
                (estimate.into_prediction(crop.id, today), true)
            }
        }
    }

    fn crop_report(
        &self,
        snapshot: &FarmSnapshot,
        recorded: &CropSnapshot,
        crop: &CropSnapshot,
        prediction: YieldPrediction,
        refreshed: bool,
        today: NaiveDate,
    ) -> CropReport {
        let analysis = &self.config.analysis;
        let yield_kg =
            (prediction.predicted_yield * to_decimal(analysis.kg_per_bag, 2)).round_dp(2);

        CropReport {
            crop_id: crop.id,
            crop_type: crop.crop_type,
            variety: crop.variety.clone(),
            recorded_stage: recorded.current_stage,
            current_stage: crop.current_stage,
            days_since_planting: crop.days_since_planting(today),
            growth_progress: crop.growth_progress_percentage(today),
            needs_attention: crop.needs_attention(today),
            revenue: self.market.calculate_revenue(crop.crop_type, yield_kg),
            profitability: self.costs.calculate_profitability(
                crop.crop_type,
                crop.area_planted,
                yield_kg,
            ),
            irrigation: self.analytics.irrigation_recommendation(
                crop.crop_type,
                &snapshot.weather,
                today,
                analysis.irrigation_window_days,
            ),
            soil_advice: self
                .soil
                .get_soil_recommendations(snapshot.farm.soil_type, Some(crop.crop_type)),
            threats: self.pests.pests_for_crop(crop.crop_type).to_vec(),
            prevention_tips: self.pests.prevention_tips(crop.crop_type),
            prediction,
            prediction_refreshed: refreshed,
        }
    }
}

impl Default for ReportingService {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

