//! Common types used across the platform

use chrono::{Days, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl GpsCoordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude as a float, for the climate estimators
    pub fn latitude_f64(&self) -> f64 {
        self.latitude.to_f64().unwrap_or(0.0)
    }

    /// Longitude as a float
    pub fn longitude_f64(&self) -> f64 {
        self.longitude.to_f64().unwrap_or(0.0)
    }
}

/// Date range for queries (both ends inclusive)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Window of `days` days ending on `today`, matching `date >= today - days`.
    /// Windows reaching past the calendar start at `NaiveDate::MIN`.
    pub fn trailing_days(today: NaiveDate, days: i64) -> Self {
        let span = Days::new(days.unsigned_abs());
        let start = if days >= 0 {
            today.checked_sub_days(span).unwrap_or(NaiveDate::MIN)
        } else {
            today.checked_add_days(span).unwrap_or(NaiveDate::MAX)
        };
        Self { start, end: today }
    }

    /// Check whether a date falls inside the range
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Convert a Decimal reading to f64 for scoring arithmetic
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Convert a computed float back to a Decimal rounded to `dp` places.
/// Rounds the exact binary value, half to even, so 2.675 becomes 2.67.
pub fn to_decimal(value: f64, dp: u32) -> Decimal {
    Decimal::from_f64_retain(value)
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven)
}
