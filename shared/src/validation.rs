//! Validation utilities for farm records
//!
//! The scoring services accept whatever they are given; these checks belong to
//! the input-collection layer and run before a snapshot is scored.

use rust_decimal::Decimal;

use crate::models::{CropSnapshot, SoilSample, WeatherSample};
use crate::types::GpsCoordinates;

// ============================================================================
// Reading Validations
// ============================================================================

/// Validate soil pH is on the 0-14 scale
pub fn validate_ph_level(ph: Decimal) -> Result<(), &'static str> {
    if ph < Decimal::ZERO || ph > Decimal::from(14) {
        return Err("pH must be between 0 and 14");
    }
    Ok(())
}

/// Validate a percentage reading (humidity, moisture, organic matter)
pub fn validate_percentage(value: Decimal) -> Result<(), &'static str> {
    if value < Decimal::ZERO || value > Decimal::from(100) {
        return Err("Percentage must be between 0 and 100");
    }
    Ok(())
}

/// Validate a reading that cannot be negative (rainfall, ppm, area)
pub fn validate_non_negative(value: Decimal) -> Result<(), &'static str> {
    if value < Decimal::ZERO {
        return Err("Value cannot be negative");
    }
    Ok(())
}

/// Validate an air temperature is physically plausible
pub fn validate_air_temperature(celsius: Decimal) -> Result<(), &'static str> {
    if celsius < Decimal::from(-90) || celsius > Decimal::from(60) {
        return Err("Temperature must be between -90 and 60°C");
    }
    Ok(())
}

/// Validate latitude and longitude ranges
pub fn validate_coordinates(coordinates: &GpsCoordinates) -> Result<(), &'static str> {
    if coordinates.latitude < Decimal::from(-90) || coordinates.latitude > Decimal::from(90) {
        return Err("Latitude must be between -90 and 90");
    }
    if coordinates.longitude < Decimal::from(-180) || coordinates.longitude > Decimal::from(180) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

// ============================================================================
// Record Validations
// ============================================================================

/// Validate a crop record; returns the offending field on failure
pub fn validate_crop(crop: &CropSnapshot) -> Result<(), (&'static str, &'static str)> {
    validate_non_negative(crop.area_planted).map_err(|e| ("area_planted", e))?;
    if let Some(expected) = crop.expected_harvest_date {
        if expected < crop.planting_date {
            return Err((
                "expected_harvest_date",
                "Expected harvest date cannot be before planting date",
            ));
        }
    }
    Ok(())
}

/// Validate a weather record
pub fn validate_weather_sample(sample: &WeatherSample) -> Result<(), (&'static str, &'static str)> {
    validate_air_temperature(sample.temperature).map_err(|e| ("temperature", e))?;
    validate_percentage(sample.humidity).map_err(|e| ("humidity", e))?;
    validate_non_negative(sample.rainfall).map_err(|e| ("rainfall", e))?;
    if let Some(wind) = sample.wind_speed {
        validate_non_negative(wind).map_err(|e| ("wind_speed", e))?;
    }
    Ok(())
}

/// Validate a soil test result
pub fn validate_soil_sample(sample: &SoilSample) -> Result<(), (&'static str, &'static str)> {
    validate_ph_level(sample.ph_level).map_err(|e| ("ph_level", e))?;
    validate_non_negative(sample.nitrogen).map_err(|e| ("nitrogen", e))?;
    validate_non_negative(sample.phosphorus).map_err(|e| ("phosphorus", e))?;
    validate_non_negative(sample.potassium).map_err(|e| ("potassium", e))?;
    if let Some(organic) = sample.organic_matter {
        validate_percentage(organic).map_err(|e| ("organic_matter", e))?;
    }
    if let Some(moisture) = sample.moisture {
        validate_percentage(moisture).map_err(|e| ("moisture", e))?;
    }
    Ok(())
}
