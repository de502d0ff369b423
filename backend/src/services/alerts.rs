//! Threshold alert rules evaluated against a farm's latest conditions

use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::config::AlertThresholds;
use shared::{to_f64, Alert, AlertKey, AlertType, CropSnapshot, Severity, WeatherSample};

/// What the alert rules look at
#[derive(Debug, Clone, Copy)]
pub struct AlertContext<'a> {
    pub farm_id: Uuid,
    pub latest_weather: Option<&'a WeatherSample>,
    pub crops: &'a [CropSnapshot],
    pub today: NaiveDate,
}

impl<'a> AlertContext<'a> {
    /// Context using the most recent of `weather`
    pub fn new(
        farm_id: Uuid,
        weather: &'a [WeatherSample],
        crops: &'a [CropSnapshot],
        today: NaiveDate,
    ) -> Self {
        Self {
            farm_id,
            latest_weather: weather.iter().max_by_key(|s| s.date),
            crops,
            today,
        }
    }
}

/// An alert rule
pub trait AlertRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Alerts the rule raises for the context
    fn evaluate(&self, ctx: &AlertContext<'_>) -> Vec<Alert>;
}

/// Heat above the high threshold, otherwise cold below the low threshold
pub struct TemperatureRule {
    pub high: f64,
    pub low: f64,
}

impl AlertRule for TemperatureRule {
    fn id(&self) -> &'static str {
        "temperature"
    }

    fn evaluate(&self, ctx: &AlertContext<'_>) -> Vec<Alert> {
        let Some(weather) = ctx.latest_weather else {
            return Vec::new();
        };
        let temperature = to_f64(weather.temperature);

        if temperature > self.high {
            vec![Alert::new(
                ctx.farm_id,
                AlertType::Weather,
                Severity::High,
                "High Temperature Alert",
                format!(
                    "Temperature is {}°C. Consider irrigation and shade for sensitive crops.",
                    weather.temperature
                ),
            )]
        } else if temperature < self.low {
            vec![Alert::new(
                ctx.farm_id,
                AlertType::Weather,
                Severity::Medium,
                "Low Temperature Alert",
                format!(
                    "Temperature is {}°C. Protect sensitive crops from cold.",
                    weather.temperature
                ),
            )]
        } else {
            Vec::new()
        }
    }
}

pub struct LowHumidityRule {
    pub threshold: f64,
}

impl AlertRule for LowHumidityRule {
    fn id(&self) -> &'static str {
        "low_humidity"
    }

    fn evaluate(&self, ctx: &AlertContext<'_>) -> Vec<Alert> {
        match ctx.latest_weather {
            Some(weather) if to_f64(weather.humidity) < self.threshold => vec![Alert::new(
                ctx.farm_id,
                AlertType::Irrigation,
                Severity::Medium,
                "Low Humidity Alert",
                format!(
                    "Humidity is {}%. Increase irrigation frequency.",
                    weather.humidity
                ),
            )],
            _ => Vec::new(),
        }
    }
}

/// Active crops stuck in an early growth stage
pub struct CropAttentionRule;

impl AlertRule for CropAttentionRule {
    fn id(&self) -> &'static str {
        "crop_attention"
    }

    fn evaluate(&self, ctx: &AlertContext<'_>) -> Vec<Alert> {
        ctx.crops
            .iter()
            .filter(|c| c.is_active && c.needs_attention(ctx.today))
            .map(|crop| {
                Alert::new(
                    ctx.farm_id,
                    AlertType::Harvest,
                    Severity::Medium,
                    format!("{} Needs Attention", crop.crop_type),
                    format!(
                        "{} at {} stage for {} days. Check growth progress.",
                        crop.crop_type,
                        crop.current_stage.as_str(),
                        crop.days_since_planting(ctx.today)
                    ),
                )
            })
            .collect()
    }
}

/// Runs the alert rules and keeps creation idempotent
pub struct AlertService {
    rules: Vec<Box<dyn AlertRule>>,
}

impl AlertService {
    pub fn new(thresholds: &AlertThresholds) -> Self {
        let rules: Vec<Box<dyn AlertRule>> = vec![
            Box::new(TemperatureRule {
                high: thresholds.high_temperature,
                low: thresholds.low_temperature,
            }),
            Box::new(LowHumidityRule {
                threshold: thresholds.low_humidity,
            }),
            Box::new(CropAttentionRule),
        ];

        Self { rules }
    }

    /// New alerts for the context.
    ///
    /// Nothing is raised for a farm with no weather readings. A draft is
    /// dropped when an alert with the same farm, type and title already
    /// exists or was raised earlier in this run.
    pub fn check_conditions(&self, ctx: &AlertContext<'_>, existing: &[Alert]) -> Vec<Alert> {
        if ctx.latest_weather.is_none() {
            tracing::debug!("No weather readings for farm {}, skipping alerts", ctx.farm_id);
            return Vec::new();
        }

        let mut seen: HashSet<AlertKey> = existing.iter().map(Alert::key).collect();
        let mut created = Vec::new();

        for rule in &self.rules {
            for alert in rule.evaluate(ctx) {
                if seen.insert(alert.key()) {
                    tracing::info!(
                        "Rule {} raised {} for farm {}",
                        rule.id(),
                        alert.title,
                        ctx.farm_id
                    );
                    created.push(alert);
                } else {
                    tracing::debug!("Skipping existing alert {}", alert.title);
                }
            }
        }

        created
    }

    pub fn list_rules(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }
}

impl Default for AlertService {
    fn default() -> Self {
        Self::new(&AlertThresholds::default())
    }
}
