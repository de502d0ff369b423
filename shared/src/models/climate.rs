//! Climate categories (simplified Köppen) and agricultural suitability

use serde::{Deserialize, Serialize};

/// Agricultural suitability of a climate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Suitability {
    Excellent,
    Good,
    Limited,
    Poor,
}

/// Climate categories, in decision-table priority order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ClimateCategory {
    Desert,
    SemiArid,
    TropicalRainforest,
    TropicalSavanna,
    Temperate,
    Highland,
    Subtropical,
}

impl ClimateCategory {
    /// Classify by mean temperature (°C) and annual rainfall (mm).
    /// First matching row wins.
    pub fn classify(temperature: f64, annual_rainfall: f64) -> Self {
        if annual_rainfall < 250.0 {
            ClimateCategory::Desert
        } else if annual_rainfall < 500.0 {
            ClimateCategory::SemiArid
        } else if temperature > 18.0 && annual_rainfall > 1500.0 {
            ClimateCategory::TropicalRainforest
        } else if temperature > 18.0 && annual_rainfall > 750.0 {
            ClimateCategory::TropicalSavanna
        } else if temperature > 10.0 && temperature <= 18.0 && annual_rainfall > 500.0 {
            ClimateCategory::Temperate
        } else if temperature < 10.0 && annual_rainfall > 500.0 {
            ClimateCategory::Highland
        } else {
            ClimateCategory::Subtropical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClimateCategory::Desert => "Desert (Arid)",
            ClimateCategory::SemiArid => "Semi-Arid (Steppe)",
            ClimateCategory::TropicalRainforest => "Tropical Rainforest",
            ClimateCategory::TropicalSavanna => "Tropical Savanna",
            ClimateCategory::Temperate => "Temperate",
            ClimateCategory::Highland => "Highland",
            ClimateCategory::Subtropical => "Subtropical",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ClimateCategory::Desert => "BW",
            ClimateCategory::SemiArid => "BS",
            ClimateCategory::TropicalRainforest => "Af",
            ClimateCategory::TropicalSavanna => "Aw",
            ClimateCategory::Temperate => "C",
            ClimateCategory::Highland => "H",
            ClimateCategory::Subtropical => "Cfa",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ClimateCategory::Desert => {
                "Very dry climate with minimal rainfall. Extreme temperatures."
            }
            ClimateCategory::SemiArid => {
                "Dry climate with limited rainfall. Suitable for drought-resistant crops."
            }
            ClimateCategory::TropicalRainforest => {
                "Hot and wet year-round. High rainfall and humidity."
            }
            ClimateCategory::TropicalSavanna => "Warm with distinct wet and dry seasons.",
            ClimateCategory::Temperate => "Moderate temperatures with adequate rainfall.",
            ClimateCategory::Highland => {
                "Cool temperatures, suitable for specific crops like tea and coffee."
            }
            ClimateCategory::Subtropical => {
                "Warm summers, mild winters, good rainfall distribution."
            }
        }
    }

    pub fn suitability(&self) -> Suitability {
        match self {
            ClimateCategory::Desert => Suitability::Poor,
            ClimateCategory::SemiArid => Suitability::Limited,
            ClimateCategory::TropicalRainforest
            | ClimateCategory::Temperate
            | ClimateCategory::Subtropical => Suitability::Excellent,
            ClimateCategory::TropicalSavanna | ClimateCategory::Highland => Suitability::Good,
        }
    }

    /// Both dry categories count as desert for crop advice
    pub fn is_desert(&self) -> bool {
        matches!(self, ClimateCategory::Desert | ClimateCategory::SemiArid)
    }

    /// Resolve a free-text climate label by substring, in lookup priority order.
    ///
    /// "Semi-Arid (Steppe)" contains "Arid" and therefore resolves to Desert,
    /// the same as the stored labels have always resolved. Returns `None` when
    /// nothing matches.
    pub fn from_label(label: &str) -> Option<Self> {
        const LOOKUP: [(&[&str], ClimateCategory); 7] = [
            (&["Desert", "Arid"], ClimateCategory::Desert),
            (&["Semi-Arid", "Steppe"], ClimateCategory::SemiArid),
            (&["Tropical Rainforest"], ClimateCategory::TropicalRainforest),
            (&["Tropical Savanna"], ClimateCategory::TropicalSavanna),
            (&["Highland"], ClimateCategory::Highland),
            (&["Temperate"], ClimateCategory::Temperate),
            (&["Subtropical"], ClimateCategory::Subtropical),
        ];

        LOOKUP
            .iter()
            .find(|(needles, _)| needles.iter().any(|n| label.contains(n)))
            .map(|(_, category)| *category)
    }
}

impl std::fmt::Display for ClimateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_table() {
        assert_eq!(ClimateCategory::classify(40.0, 100.0), ClimateCategory::Desert);
        assert_eq!(ClimateCategory::classify(25.0, 300.0), ClimateCategory::SemiArid);
        assert_eq!(ClimateCategory::classify(25.0, 2000.0), ClimateCategory::TropicalRainforest);
        assert_eq!(ClimateCategory::classify(25.0, 1000.0), ClimateCategory::TropicalSavanna);
        assert_eq!(ClimateCategory::classify(15.0, 600.0), ClimateCategory::Temperate);
        assert_eq!(ClimateCategory::classify(5.0, 900.0), ClimateCategory::Highland);
        // Hot but only moderately wet falls through to subtropical
        assert_eq!(ClimateCategory::classify(25.0, 600.0), ClimateCategory::Subtropical);
        // Exactly 10 °C is neither temperate nor highland
        assert_eq!(ClimateCategory::classify(10.0, 900.0), ClimateCategory::Subtropical);
        // Exactly 500 mm is not semi-arid and not above 500
        assert_eq!(ClimateCategory::classify(15.0, 500.0), ClimateCategory::Subtropical);
    }

    #[test]
    fn test_codes_and_suitability() {
        assert_eq!(ClimateCategory::TropicalRainforest.code(), "Af");
        assert_eq!(ClimateCategory::Temperate.suitability(), Suitability::Excellent);
        assert_eq!(ClimateCategory::SemiArid.suitability(), Suitability::Limited);
        assert!(ClimateCategory::SemiArid.is_desert());
        assert!(!ClimateCategory::Highland.is_desert());
    }

    #[test]
    fn test_label_lookup_priority() {
        assert_eq!(
            ClimateCategory::from_label("Semi-Arid (Steppe)"),
            Some(ClimateCategory::Desert)
        );
        assert_eq!(ClimateCategory::from_label("Steppe"), Some(ClimateCategory::SemiArid));
        assert_eq!(ClimateCategory::from_label("Subtropical"), Some(ClimateCategory::Subtropical));
        assert_eq!(ClimateCategory::from_label("Highland"), Some(ClimateCategory::Highland));
        assert_eq!(ClimateCategory::from_label("Polar"), None);
    }

    #[test]
    fn test_labels_resolve_to_themselves_except_semi_arid() {
        for category in [
            ClimateCategory::Desert,
            ClimateCategory::TropicalRainforest,
            ClimateCategory::TropicalSavanna,
            ClimateCategory::Temperate,
            ClimateCategory::Highland,
            ClimateCategory::Subtropical,
        ] {
            assert_eq!(ClimateCategory::from_label(category.label()), Some(category));
        }
    }
}
