//! Climate classification and crop suitability for a farm location

use serde::Serialize;

use shared::{ClimateCategory, CurrentWeather, Suitability};

// Calibration constants for the location rainfall estimate (mm/year).
// Each estimate is `base + humidity_offset * slope` for one climate band.
const TROPICAL_LATITUDE: f64 = 23.5;
const TEMPERATE_LATITUDE: f64 = 50.0;
const WET_SPELL_RAINFALL_MM: f64 = 5.0;
const WET_SPELL_FLOOR_MM: f64 = 900.0;

/// Result of classifying a temperature/rainfall pair
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClimateResult {
    pub category: ClimateCategory,
    pub climate_type: &'static str,
    pub climate_code: &'static str,
    pub description: &'static str,
    pub suitability: Suitability,
    pub is_desert: bool,
    pub temperature: f64,
    pub rainfall: f64,
}

/// Crops grouped by how well they fit a climate
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CropSuitability {
    pub suitable: Vec<&'static str>,
    pub possible: Vec<&'static str>,
    pub not_suitable: Vec<&'static str>,
    pub irrigation: &'static str,
    pub warning: Option<&'static str>,
}

/// Latitude and longitude echoed back in a location report
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Full climate report for a location
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocationClimate {
    pub climate: ClimateResult,
    pub suitable_crops: CropSuitability,
    pub recommendations: Vec<String>,
    pub water_status: &'static str,
    pub agricultural_potential: Suitability,
    pub location: Location,
}

/// Broad latitude band
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ClimateZone {
    pub zone: &'static str,
    pub description: &'static str,
}

/// Local climate character inferred from latitude and current readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LocalClimate {
    LakeOrCoastal,
    TropicalHighland,
    TropicalArid,
    TropicalSemiArid,
    TropicalModerate,
    CoolTemperate,
    WarmTemperate,
    Cold,
}

impl LocalClimate {
    fn infer(latitude: f64, temperature: f64, humidity: f64) -> Self {
        let lat = latitude.abs();
        if lat < TROPICAL_LATITUDE {
            if humidity > 70.0 && temperature > 22.0 {
                LocalClimate::LakeOrCoastal
            } else if temperature < 18.0 && humidity > 60.0 {
                LocalClimate::TropicalHighland
            } else if humidity < 40.0 && temperature > 28.0 {
                LocalClimate::TropicalArid
            } else if humidity < 50.0 && temperature > 25.0 {
                LocalClimate::TropicalSemiArid
            } else {
                LocalClimate::TropicalModerate
            }
        } else if lat < TEMPERATE_LATITUDE {
            if temperature < 15.0 {
                LocalClimate::CoolTemperate
            } else {
                LocalClimate::WarmTemperate
            }
        } else {
            LocalClimate::Cold
        }
    }

    /// Estimated annual rainfall in mm, linear in humidity
    fn estimated_rainfall(&self, humidity: f64) -> f64 {
        match self {
            LocalClimate::LakeOrCoastal => 1200.0 + (humidity - 70.0) * 20.0,
            LocalClimate::TropicalHighland => 1100.0 + (humidity - 60.0) * 15.0,
            LocalClimate::TropicalArid => 250.0 + humidity * 5.0,
            LocalClimate::TropicalSemiArid => 400.0 + humidity * 8.0,
            LocalClimate::TropicalModerate => 800.0 + humidity * 10.0,
            LocalClimate::CoolTemperate => 700.0 + humidity * 8.0,
            LocalClimate::WarmTemperate => 600.0 + humidity * 10.0,
            LocalClimate::Cold => 400.0 + humidity * 6.0,
        }
    }

    fn insight(&self) -> &'static str {
        match self {
            LocalClimate::LakeOrCoastal => "🌊 Lake/Coastal Climate (like Kisumu, Mombasa)",
            LocalClimate::TropicalHighland => "⛰️ Highland Climate (like Kericho, Nyandarua)",
            LocalClimate::TropicalArid => "🏜️ Arid Climate (like Mandera, Turkana)",
            LocalClimate::TropicalSemiArid => "🌾 Semi-Arid Climate (like Machakos, Kitui)",
            LocalClimate::TropicalModerate => "🌤️ Tropical/Subtropical Climate",
            LocalClimate::CoolTemperate => {
                "🌧️ Cool Temperate Climate (like UK, Ireland, Northern Europe)"
            }
            LocalClimate::WarmTemperate => "🌤️ Warm Temperate Climate (like Mediterranean)",
            LocalClimate::Cold => "❄️ Cold Climate (like Scandinavia, Canada)",
        }
    }
}

const DESERT_ACTIONS: [&str; 7] = [
    "🏜️ DESERT/ARID CLIMATE DETECTED",
    "• Drip irrigation is ESSENTIAL for any agriculture",
    "• Consider greenhouse farming to conserve water",
    "• Use mulching to reduce water evaporation",
    "• Plant drought-resistant varieties only",
    "• Harvest rainwater when available",
    "• Focus on livestock (camels, goats) as alternative",
];

/// Climate classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct ClimateClassifier;

impl ClimateClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify mean temperature (°C) and annual rainfall (mm).
    ///
    /// Humidity is accepted for parity with the location report but does not
    /// influence the category.
    pub fn classify_climate(
        &self,
        temperature: f64,
        annual_rainfall: f64,
        _humidity: Option<f64>,
    ) -> ClimateResult {
        let category = ClimateCategory::classify(temperature, annual_rainfall);
        tracing::debug!(
            "Classified {:.1}°C / {:.0}mm as {}",
            temperature,
            annual_rainfall,
            category
        );

        ClimateResult {
            category,
            climate_type: category.label(),
            climate_code: category.code(),
            description: category.description(),
            suitability: category.suitability(),
            is_desert: category.is_desert(),
            temperature,
            rainfall: annual_rainfall,
        }
    }

    /// Crop lists for a climate category.
    ///
    /// `is_desert` forces the desert lists regardless of category.
    pub fn get_suitable_crops(
        &self,
        category: ClimateCategory,
        is_desert: bool,
        temperature: f64,
        rainfall: f64,
    ) -> CropSuitability {
        if is_desert {
            return desert_crops();
        }

        match category {
            ClimateCategory::Desert => desert_crops(),
            ClimateCategory::SemiArid => CropSuitability {
                suitable: vec!["Sorghum", "Pearl Millet", "Cowpeas", "Pigeon Peas", "Cassava"],
                possible: vec!["Maize (with irrigation)", "Sunflower", "Groundnuts"],
                not_suitable: vec!["Rice", "Tea", "Coffee", "Water-intensive crops"],
                irrigation: "Highly recommended - Drip or sprinkler systems",
                warning: Some("⚠️ Limited rainfall - Choose drought-resistant varieties"),
            },
            ClimateCategory::TropicalRainforest => CropSuitability {
                suitable: vec![
                    "Banana",
                    "Pineapple",
                    "Cassava",
                    "Yams",
                    "Cocoa",
                    "Oil Palm",
                    "Rubber",
                ],
                possible: vec!["Rice", "Sugarcane", "Coconut", "Papaya", "Mango"],
                not_suitable: vec!["Wheat", "Barley", "Temperate fruits", "Potatoes"],
                irrigation: "Minimal - Natural rainfall usually sufficient",
                warning: None,
            },
            ClimateCategory::TropicalSavanna => CropSuitability {
                suitable: vec!["Maize", "Beans", "Cassava", "Sweet Potato", "Sorghum", "Millet"],
                possible: vec![
                    "Rice (in wet season)",
                    "Sugarcane",
                    "Cotton",
                    "Groundnuts",
                    "Sunflower",
                ],
                not_suitable: vec!["Wheat", "Barley", "Tea", "Coffee (unless highland)"],
                irrigation: "Needed during dry season - Supplemental irrigation recommended",
                warning: None,
            },
            ClimateCategory::Highland => {
                let (suitable, possible) = if temperature < 12.0 {
                    (
                        vec![
                            "Tea",
                            "Pyrethrum",
                            "Wheat",
                            "Barley",
                            "Irish Potato",
                            "Cabbage",
                            "Carrots",
                        ],
                        vec!["Coffee (Arabica)", "Maize", "Beans"],
                    )
                } else {
                    (
                        vec![
                            "Coffee (Arabica)",
                            "Tea",
                            "Irish Potato",
                            "Cabbage",
                            "Carrots",
                            "Onions",
                        ],
                        vec!["Maize", "Beans", "Wheat", "Tomatoes"],
                    )
                };
                CropSuitability {
                    suitable,
                    possible,
                    not_suitable: vec!["Tropical fruits", "Cotton", "Cassava", "Banana"],
                    irrigation: "Usually adequate rainfall, supplemental may be needed in dry season",
                    warning: None,
                }
            }
            ClimateCategory::Temperate => CropSuitability {
                suitable: vec![
                    "Maize", "Wheat", "Beans", "Tomato", "Potato", "Cabbage", "Lettuce", "Carrots",
                ],
                possible: vec!["Coffee (lower altitudes)", "Apples", "Grapes", "Strawberries"],
                not_suitable: vec!["Tropical crops requiring high heat", "Banana", "Cassava"],
                irrigation: "Supplemental irrigation recommended during dry periods",
                warning: None,
            },
            ClimateCategory::Subtropical => {
                let (suitable, possible) = if rainfall > 1000.0 {
                    (
                        vec!["Maize", "Rice", "Sugarcane", "Citrus fruits", "Avocado", "Mango"],
                        vec!["Coffee", "Tea", "Banana", "Pineapple"],
                    )
                } else {
                    (
                        vec!["Maize", "Beans", "Tomato", "Citrus fruits", "Avocado"],
                        vec!["Wheat", "Sunflower", "Groundnuts"],
                    )
                };
                CropSuitability {
                    suitable,
                    possible,
                    not_suitable: vec!["Crops requiring extreme cold or heat"],
                    irrigation: if rainfall < 800.0 {
                        "Supplemental irrigation recommended"
                    } else {
                        "May need irrigation in dry season"
                    },
                    warning: None,
                }
            }
        }
    }

    /// Crop lists for a free-text climate label, as stored on older records.
    ///
    /// Labels that match no known category get a generic list.
    pub fn get_suitable_crops_for_label(
        &self,
        climate_type: &str,
        is_desert: bool,
        temperature: f64,
        rainfall: f64,
    ) -> CropSuitability {
        match ClimateCategory::from_label(climate_type) {
            Some(category) => self.get_suitable_crops(category, is_desert, temperature, rainfall),
            None if is_desert => desert_crops(),
            None => CropSuitability {
                suitable: vec!["Maize", "Beans", "Vegetables"],
                possible: vec!["Various crops depending on specific conditions"],
                not_suitable: vec![],
                irrigation: "Assess based on rainfall patterns",
                warning: None,
            },
        }
    }

    /// Estimate annual rainfall for a location from its latitude and the
    /// current readings.
    pub fn estimate_annual_rainfall(&self, latitude: f64, weather: &CurrentWeather) -> f64 {
        let local = LocalClimate::infer(latitude, weather.temperature, weather.humidity);
        let estimate = local.estimated_rainfall(weather.humidity);

        if weather.rainfall > WET_SPELL_RAINFALL_MM {
            estimate.max(WET_SPELL_FLOOR_MM)
        } else {
            estimate
        }
    }

    /// Complete climate analysis for a location
    pub fn analyze_location_climate(
        &self,
        latitude: f64,
        longitude: f64,
        weather: &CurrentWeather,
    ) -> LocationClimate {
        let temperature = weather.temperature;
        let humidity = weather.humidity;
        let local = LocalClimate::infer(latitude, temperature, humidity);
        let rainfall = self.estimate_annual_rainfall(latitude, weather);

        let climate = self.classify_climate(temperature, rainfall, Some(humidity));
        let suitable_crops =
            self.get_suitable_crops(climate.category, climate.is_desert, temperature, rainfall);

        let mut recommendations = vec![local.insight().to_string()];

        if climate.is_desert {
            recommendations.extend(DESERT_ACTIONS.iter().map(|s| s.to_string()));
        } else {
            recommendations.push(
                match climate.suitability {
                    Suitability::Excellent => "✅ Excellent climate for agriculture!",
                    Suitability::Good => "✓ Good climate for agriculture with proper management",
                    Suitability::Limited | Suitability::Poor => {
                        "⚠️ Limited agricultural potential - special measures needed"
                    }
                }
                .to_string(),
            );

            let rainfall_actions: &[&str] = if climate.rainfall < 400.0 {
                &[
                    "• CRITICAL: Install irrigation system immediately",
                    "• Choose only drought-resistant crops",
                ]
            } else if climate.rainfall < 600.0 {
                &[
                    "• Irrigation system highly recommended",
                    "• Plant early to maximize rainfall",
                ]
            } else if climate.rainfall < 800.0 {
                &["• Supplemental irrigation needed during dry season"]
            } else {
                &[]
            };

            let temperature_actions: &[&str] = if temperature > 30.0 {
                &[
                    "• Provide shade for sensitive crops",
                    "• Increase watering frequency",
                    "• Mulch to keep soil cool",
                ]
            } else if temperature < 15.0 {
                &[
                    "• Consider cold-hardy varieties",
                    "• Use mulching for temperature regulation",
                    "• Protect crops from frost",
                ]
            } else {
                &[]
            };

            let humidity_actions: &[&str] = if humidity > 75.0 {
                &[
                    "• Watch for fungal diseases in high humidity",
                    "• Ensure good air circulation",
                ]
            } else if humidity < 40.0 {
                &[
                    "• Increase irrigation frequency",
                    "• Use mulch to retain soil moisture",
                ]
            } else {
                &[]
            };

            recommendations.extend(
                rainfall_actions
                    .iter()
                    .chain(temperature_actions)
                    .chain(humidity_actions)
                    .map(|s| s.to_string()),
            );
        }

        tracing::debug!(
            "Location ({:.4}, {:.4}) estimated {:.0}mm rainfall, {}",
            latitude,
            longitude,
            rainfall,
            climate.climate_type
        );

        LocationClimate {
            water_status: water_status(climate.rainfall),
            agricultural_potential: climate.suitability,
            climate,
            suitable_crops,
            recommendations,
            location: Location {
                latitude,
                longitude,
            },
        }
    }

    /// General climate zone by latitude
    pub fn climate_zone_by_latitude(&self, latitude: f64) -> ClimateZone {
        let lat = latitude.abs();
        let (zone, description) = if lat < 23.5 {
            ("Tropical Zone", "Hot year-round, high rainfall potential")
        } else if lat < 35.0 {
            ("Subtropical Zone", "Warm summers, mild winters")
        } else if lat < 66.5 {
            ("Temperate Zone", "Four distinct seasons")
        } else {
            ("Polar Zone", "Very cold, limited agriculture")
        };
        ClimateZone { zone, description }
    }
}

fn desert_crops() -> CropSuitability {
    CropSuitability {
        suitable: vec!["Date Palm", "Cactus Pear", "Aloe Vera", "Drought-resistant Millet"],
        possible: vec![
            "Sorghum (with irrigation)",
            "Pearl Millet (with irrigation)",
            "Chickpeas (with irrigation)",
        ],
        not_suitable: vec!["Rice", "Tea", "Coffee", "Banana", "Most vegetables", "Maize"],
        irrigation: "Essential - Drip irrigation highly recommended",
        warning: Some("⚠️ DESERT CLIMATE: Agriculture very challenging without irrigation"),
    }
}

/// Water availability label for an annual rainfall estimate
pub fn water_status(annual_rainfall: f64) -> &'static str {
    if annual_rainfall < 400.0 {
        "Critical - Irrigation Essential for Survival"
    } else if annual_rainfall < 600.0 {
        "Very Low - Irrigation Required"
    } else if annual_rainfall < 800.0 {
        "Low - Supplemental Irrigation Needed"
    } else if annual_rainfall < 1200.0 {
        "Adequate - Seasonal Irrigation May Be Needed"
    } else {
        "Abundant - Good Natural Water Supply"
    }
}
