//! Yield prediction models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Per-factor multipliers behind a prediction; `None` means unknown.
///
/// Serialized as two-decimal labels ("1.00", "Unknown"). Numbers, labels
/// and nulls are all accepted when reading stored predictions.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PredictionFactors {
    #[serde(default, deserialize_with = "factor_from_label")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "factor_from_label")]
    pub rainfall: Option<f64>,
    #[serde(default, deserialize_with = "factor_from_label")]
    pub humidity: Option<f64>,
    #[serde(default, deserialize_with = "factor_from_label")]
    pub stage_bonus: Option<f64>,
}

impl PredictionFactors {
    /// Factors for a prediction made without any weather data
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_known(&self) -> bool {
        self.temperature.is_some() && self.rainfall.is_some() && self.humidity.is_some()
    }

    /// Two-decimal labels, "Unknown" for missing factors
    pub fn labels(&self) -> [(&'static str, String); 4] {
        let fmt = |v: Option<f64>| v.map_or_else(|| "Unknown".to_string(), |v| format!("{:.2}", v));
        [
            ("temperature", fmt(self.temperature)),
            ("rainfall", fmt(self.rainfall)),
            ("humidity", fmt(self.humidity)),
            ("stage_bonus", fmt(self.stage_bonus)),
        ]
    }
}

impl Serialize for PredictionFactors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PredictionFactors", 4)?;
        for (name, label) in self.labels() {
            state.serialize_field(name, &label)?;
        }
        state.end()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFactor {
    Number(f64),
    Label(String),
}

fn factor_from_label<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawFactor>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawFactor::Number(value)) => Ok(Some(value)),
        Some(RawFactor::Label(label)) if label.eq_ignore_ascii_case("unknown") => Ok(None),
        Some(RawFactor::Label(label)) => label
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid factor {:?}", label))),
    }
}

/// A stored yield prediction for one crop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldPrediction {
    pub crop_id: Uuid,
    /// Bags
    pub predicted_yield: Decimal,
    /// 0-100
    pub confidence_score: Decimal,
    #[serde(default)]
    pub factors: PredictionFactors,
    pub prediction_date: NaiveDate,
    #[serde(default)]
    pub actual_yield: Option<Decimal>,
}

impl YieldPrediction {
    pub fn age_days(&self, today: NaiveDate) -> i64 {
        (today - self.prediction_date).num_days()
    }

    /// Older than the allowed age; an age equal to the limit is still fresh
    pub fn is_stale(&self, today: NaiveDate, max_age_days: i64) -> bool {
        self.age_days(today) > max_age_days
    }
}
