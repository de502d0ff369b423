//! Farm snapshots: everything the advisory needs about one farm

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use shared::{
    validate_coordinates, validate_crop, validate_non_negative, validate_soil_sample,
    validate_weather_sample, Alert, CropSnapshot, CurrentWeather, Farm, SoilSample, WeatherSample,
    YieldPrediction,
};

/// Read-only records for one farm, as exported by the storage layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmSnapshot {
    pub farm: Farm,
    #[serde(default)]
    pub crops: Vec<CropSnapshot>,
    #[serde(default)]
    pub weather: Vec<WeatherSample>,
    #[serde(default)]
    pub soil_samples: Vec<SoilSample>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub predictions: Vec<YieldPrediction>,
    /// Conditions from the weather fetcher, if it ran
    #[serde(default)]
    pub current_weather: Option<CurrentWeather>,
}

impl FarmSnapshot {
    /// Read, parse and validate a snapshot file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&raw)?;
        tracing::info!(
            "Loaded snapshot for farm {} from {}: {} crops, {} weather samples",
            snapshot.farm.name,
            path.display(),
            snapshot.crops.len(),
            snapshot.weather.len()
        );
        Ok(snapshot)
    }

    pub fn from_json(raw: &str) -> AppResult<Self> {
        let snapshot: FarmSnapshot = serde_json::from_str(raw)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check every record; the first failure names the record and field
    pub fn validate(&self) -> AppResult<()> {
        validate_non_negative(self.farm.size_acres)
            .map_err(|e| AppError::validation("farm", 0, "size_acres", e))?;
        if let Some(coordinates) = &self.farm.coordinates {
            validate_coordinates(coordinates)
                .map_err(|e| AppError::validation("farm", 0, "coordinates", e))?;
        }

        for (i, crop) in self.crops.iter().enumerate() {
            validate_crop(crop).map_err(|(field, e)| AppError::validation("crops", i, field, e))?;
        }
        for (i, sample) in self.weather.iter().enumerate() {
            validate_weather_sample(sample)
                .map_err(|(field, e)| AppError::validation("weather", i, field, e))?;
        }
        for (i, sample) in self.soil_samples.iter().enumerate() {
            validate_soil_sample(sample)
                .map_err(|(field, e)| AppError::validation("soil_samples", i, field, e))?;
        }
        for (i, prediction) in self.predictions.iter().enumerate() {
            if !self.crops.iter().any(|c| c.id == prediction.crop_id) {
                return Err(AppError::validation(
                    "predictions",
                    i,
                    "crop_id",
                    "Prediction refers to an unknown crop",
                ));
            }
        }

        Ok(())
    }

    /// Weather samples recorded on or after `crop`'s planting date
    pub fn weather_since_planting(&self, crop: &CropSnapshot) -> Vec<WeatherSample> {
        self.weather
            .iter()
            .filter(|s| s.date >= crop.planting_date)
            .cloned()
            .collect()
    }

    /// Most recent soil sample
    pub fn latest_soil_sample(&self) -> Option<&SoilSample> {
        self.soil_samples.iter().max_by_key(|s| s.measurement_date)
    }
}
