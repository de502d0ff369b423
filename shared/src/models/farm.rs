//! Farm models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::SoilType;
use crate::types::GpsCoordinates;

/// A registered farm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farm {
    pub id: Uuid,
    pub name: String,
    /// Free-text place name
    pub location: String,
    #[serde(default)]
    pub coordinates: Option<GpsCoordinates>,
    pub size_acres: Decimal,
    #[serde(default)]
    pub soil_type: SoilType,
}
