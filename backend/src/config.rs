//! Configuration management for the Climate Monitor backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CM_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Analysis windows and staleness policy
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Alert thresholds
    #[serde(default)]
    pub alerts: AlertThresholds,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// EnvFilter directive used when RUST_LOG is unset
    pub filter: String,

    /// Emit JSON log lines instead of the human format
    pub json: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisConfig {
    /// Days of weather history used for trends and statistics
    pub trend_window_days: i64,

    /// Days of weather history used for irrigation advice
    pub irrigation_window_days: i64,

    /// Predictions older than this are recomputed
    pub prediction_max_age_days: i64,

    /// Maximum number of crop recommendations returned
    pub recommendation_limit: usize,

    /// Weight of one bag of predicted yield, for revenue estimates
    pub kg_per_bag: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertThresholds {
    /// Above this temperature (°C) a high temperature alert is raised
    pub high_temperature: f64,

    /// Below this temperature (°C) a low temperature alert is raised
    pub low_temperature: f64,

    /// Below this relative humidity (%) a low humidity alert is raised
    pub low_humidity: f64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("CM_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let logging = LoggingConfig::default();
        let analysis = AnalysisConfig::default();
        let alerts = AlertThresholds::default();

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("logging.filter", logging.filter)?
            .set_default("logging.json", logging.json)?
            .set_default("analysis.trend_window_days", analysis.trend_window_days)?
            .set_default("analysis.irrigation_window_days", analysis.irrigation_window_days)?
            .set_default("analysis.prediction_max_age_days", analysis.prediction_max_age_days)?
            .set_default("analysis.recommendation_limit", analysis.recommendation_limit as u64)?
            .set_default("analysis.kg_per_bag", analysis.kg_per_bag)?
            .set_default("alerts.high_temperature", alerts.high_temperature)?
            .set_default("alerts.low_temperature", alerts.low_temperature)?
            .set_default("alerts.low_humidity", alerts.low_humidity)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CM_ prefix)
            .add_source(
                Environment::with_prefix("CM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            logging: LoggingConfig::default(),
            analysis: AnalysisConfig::default(),
            alerts: AlertThresholds::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "cm_advisor=info,climate_monitor_backend=info".to_string(),
            json: false,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            trend_window_days: 30,
            irrigation_window_days: 7,
            prediction_max_age_days: 7,
            recommendation_limit: 5,
            kg_per_bag: 90.0,
        }
    }
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            high_temperature: 35.0,
            low_temperature: 10.0,
            low_humidity: 40.0,
        }
    }
}
