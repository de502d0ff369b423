//! Scoring and advisory services for the Climate Monitor platform

pub mod alerts;
pub mod analytics;
pub mod climate;
pub mod market;
pub mod pests;
pub mod prediction;
pub mod reporting;
pub mod soil;

pub use alerts::AlertService;
pub use analytics::FarmAnalytics;
pub use climate::ClimateClassifier;
pub use market::{CostCalculator, MarketPriceService};
pub use pests::PestDiseaseDatabase;
pub use prediction::YieldPredictionService;
pub use reporting::ReportingService;
pub use soil::SoilAnalysisService;
