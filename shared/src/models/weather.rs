//! Weather data models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A daily weather reading recorded for a farm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSample {
    pub date: NaiveDate,
    /// Degrees Celsius
    pub temperature: Decimal,
    /// Relative humidity, 0-100
    pub humidity: Decimal,
    /// Millimetres
    #[serde(default)]
    pub rainfall: Decimal,
    /// Metres per second
    #[serde(default)]
    pub wind_speed: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Current conditions handed over by the weather fetcher
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentWeather {
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_humidity")]
    pub humidity: f64,
    #[serde(default)]
    pub rainfall: f64,
}

fn default_temperature() -> f64 {
    20.0
}

fn default_humidity() -> f64 {
    60.0
}

impl Default for CurrentWeather {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            humidity: default_humidity(),
            rainfall: 0.0,
        }
    }
}

/// Direction of the temperature over a window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureTrend {
    Rising,
    Falling,
    Stable,
}

/// Rainfall character of a window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RainfallTrend {
    Drought,
    Normal,
    Heavy,
}

impl RainfallTrend {
    /// Classify total rainfall (mm) over the trend window
    pub fn from_total(total_rainfall: f64) -> Self {
        if total_rainfall < 10.0 {
            RainfallTrend::Drought
        } else if total_rainfall > 200.0 {
            RainfallTrend::Heavy
        } else {
            RainfallTrend::Normal
        }
    }
}

/// How often to irrigate given the weekly water deficit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum IrrigationFrequency {
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "every 2-3 days")]
    EveryTwoToThreeDays,
    #[serde(rename = "weekly")]
    Weekly,
}

impl IrrigationFrequency {
    /// Deficit in mm; both thresholds are exclusive
    pub fn from_deficit(deficit_mm: f64) -> Self {
        if deficit_mm > 20.0 {
            IrrigationFrequency::Daily
        } else if deficit_mm > 10.0 {
            IrrigationFrequency::EveryTwoToThreeDays
        } else {
            IrrigationFrequency::Weekly
        }
    }
}

impl std::fmt::Display for IrrigationFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IrrigationFrequency::Daily => write!(f, "daily"),
            IrrigationFrequency::EveryTwoToThreeDays => write!(f, "every 2-3 days"),
            IrrigationFrequency::Weekly => write!(f, "weekly"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_irrigation_frequency_boundaries() {
        assert_eq!(IrrigationFrequency::from_deficit(20.01), IrrigationFrequency::Daily);
        assert_eq!(
            IrrigationFrequency::from_deficit(20.0),
            IrrigationFrequency::EveryTwoToThreeDays
        );
        assert_eq!(
            IrrigationFrequency::from_deficit(10.5),
            IrrigationFrequency::EveryTwoToThreeDays
        );
        assert_eq!(IrrigationFrequency::from_deficit(10.0), IrrigationFrequency::Weekly);
        assert_eq!(IrrigationFrequency::from_deficit(-4.0), IrrigationFrequency::Weekly);
    }

    #[test]
    fn test_irrigation_frequency_serializes_as_label() {
        let json = serde_json::to_string(&IrrigationFrequency::EveryTwoToThreeDays).unwrap();
        assert_eq!(json, "\"every 2-3 days\"");
    }

    #[test]
    fn test_rainfall_trend() {
        assert_eq!(RainfallTrend::from_total(9.9), RainfallTrend::Drought);
        assert_eq!(RainfallTrend::from_total(10.0), RainfallTrend::Normal);
        assert_eq!(RainfallTrend::from_total(200.0), RainfallTrend::Normal);
        assert_eq!(RainfallTrend::from_total(200.5), RainfallTrend::Heavy);
    }

    #[test]
    fn test_current_weather_defaults() {
        let weather: CurrentWeather = serde_json::from_str("{}").unwrap();
        assert_eq!(weather, CurrentWeather::default());
        assert_eq!(weather.temperature, 20.0);
        assert_eq!(weather.humidity, 60.0);
    }
}
