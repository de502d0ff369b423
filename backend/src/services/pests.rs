//! Reference table of common crop pests and diseases

use serde::Serialize;

use shared::{CropType, Severity};

use Severity::{Critical, High, Medium};
use ThreatKind::{Disease, Pest};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ThreatKind {
    Pest,
    Disease,
}

/// A pest or disease entry
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Threat {
    pub name: &'static str,
    pub kind: ThreatKind,
    pub severity: Severity,
    pub symptoms: &'static str,
    pub treatment: &'static str,
    pub prevention: &'static str,
}

/// A threat together with the crop it affects
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CropThreat {
    pub crop: CropType,
    #[serde(flatten)]
    pub threat: Threat,
}

const fn threat(
    name: &'static str,
    kind: ThreatKind,
    severity: Severity,
    symptoms: &'static str,
    treatment: &'static str,
    prevention: &'static str,
) -> Threat {
    Threat {
        name,
        kind,
        severity,
        symptoms,
        treatment,
        prevention,
    }
}

static MAIZE: [Threat; 3] = [
    threat(
        "Fall Armyworm",
        Pest,
        High,
        "Holes in leaves, damaged tassels, frass in whorl",
        "Apply Bt-based pesticides, use pheromone traps, practice crop rotation",
        "Early planting, intercropping with legumes, regular scouting",
    ),
    threat(
        "Maize Streak Virus",
        Disease,
        High,
        "Yellow streaks on leaves, stunted growth",
        "No cure - remove infected plants, control leafhoppers",
        "Use resistant varieties, control leafhopper vectors",
    ),
    threat(
        "Maize Weevil",
        Pest,
        Medium,
        "Holes in stored grains, powder in storage",
        "Fumigate storage, use hermetic bags",
        "Proper drying before storage, clean storage facilities",
    ),
];

static BEANS: [Threat; 2] = [
    threat(
        "Bean Fly",
        Pest,
        High,
        "Wilting seedlings, stem tunneling",
        "Apply systemic insecticides, remove infected plants",
        "Seed treatment, early planting, use resistant varieties",
    ),
    threat(
        "Angular Leaf Spot",
        Disease,
        Medium,
        "Angular brown spots on leaves",
        "Apply copper-based fungicides",
        "Use certified seeds, crop rotation, avoid overhead irrigation",
    ),
];

static COFFEE: [Threat; 2] = [
    threat(
        "Coffee Berry Disease",
        Disease,
        Critical,
        "Dark sunken lesions on berries",
        "Apply copper fungicides regularly",
        "Prune for air circulation, remove infected berries",
    ),
    threat(
        "Coffee Leaf Rust",
        Disease,
        High,
        "Orange-yellow spots on leaf undersides",
        "Apply systemic fungicides",
        "Use resistant varieties, proper spacing, shade management",
    ),
];

static TEA: [Threat; 2] = [
    threat(
        "Tea Mosquito Bug",
        Pest,
        High,
        "Distorted shoots, brown lesions",
        "Apply approved insecticides",
        "Regular pruning, remove alternate hosts",
    ),
    threat(
        "Blister Blight",
        Disease,
        High,
        "Translucent spots on young leaves",
        "Apply copper fungicides",
        "Proper spacing, avoid overhead irrigation",
    ),
];

static POTATO: [Threat; 2] = [
    threat(
        "Late Blight",
        Disease,
        Critical,
        "Dark water-soaked lesions on leaves and tubers",
        "Apply metalaxyl or mancozeb fungicides",
        "Use certified seeds, hill properly, destroy infected plants",
    ),
    threat(
        "Potato Tuber Moth",
        Pest,
        High,
        "Tunnels in tubers, leaf mining",
        "Apply Bt-based insecticides",
        "Deep planting, proper hilling, clean storage",
    ),
];

static TOMATO: [Threat; 3] = [
    threat(
        "Tomato Leaf Miner (Tuta absoluta)",
        Pest,
        Critical,
        "Irregular mines in leaves, damaged fruits",
        "Use pheromone traps, apply approved insecticides",
        "Screen greenhouses, destroy crop residues, rotate crops",
    ),
    threat(
        "Early Blight",
        Disease,
        Medium,
        "Concentric rings on older leaves",
        "Apply chlorothalonil or mancozeb",
        "Crop rotation, mulching, avoid overhead watering",
    ),
    threat(
        "Bacterial Wilt",
        Disease,
        High,
        "Sudden wilting, no leaf yellowing",
        "No cure - remove and destroy infected plants",
        "Use resistant varieties, crop rotation, soil solarization",
    ),
];

static WHEAT: [Threat; 2] = [
    threat(
        "Wheat Rust",
        Disease,
        High,
        "Orange-red pustules on leaves and stems",
        "Apply triazole fungicides",
        "Use resistant varieties, timely planting",
    ),
    threat(
        "Aphids",
        Pest,
        Medium,
        "Sticky honeydew, yellowing leaves",
        "Apply systemic insecticides",
        "Encourage natural predators, avoid over-fertilization",
    ),
];

/// Search order for cross-crop queries
static SEARCH_ORDER: [CropType; 7] = [
    CropType::Maize,
    CropType::Beans,
    CropType::Coffee,
    CropType::Tea,
    CropType::Potato,
    CropType::Tomato,
    CropType::Wheat,
];

/// Pest and disease lookup
#[derive(Debug, Clone, Copy, Default)]
pub struct PestDiseaseDatabase;

impl PestDiseaseDatabase {
    pub fn new() -> Self {
        Self
    }

    pub fn pests_for_crop(&self, crop_type: CropType) -> &'static [Threat] {
        match crop_type {
            CropType::Maize => &MAIZE,
            CropType::Beans => &BEANS,
            CropType::Wheat => &WHEAT,
            CropType::Coffee => &COFFEE,
            CropType::Tea => &TEA,
            CropType::Potato => &POTATO,
            CropType::Tomato => &TOMATO,
        }
    }

    fn all(&self) -> impl Iterator<Item = CropThreat> + '_ {
        SEARCH_ORDER.iter().flat_map(move |crop| {
            self.pests_for_crop(*crop).iter().map(move |threat| CropThreat {
                crop: *crop,
                threat: *threat,
            })
        })
    }

    /// Case-insensitive substring match on symptoms
    pub fn search_by_symptom(&self, keyword: &str) -> Vec<CropThreat> {
        let keyword = keyword.to_lowercase();
        self.all()
            .filter(|t| t.threat.symptoms.to_lowercase().contains(&keyword))
            .collect()
    }

    pub fn critical_threats(&self) -> Vec<CropThreat> {
        self.all()
            .filter(|t| t.threat.severity == Severity::Critical)
            .collect()
    }

    /// Distinct prevention tips, first occurrence first
    pub fn prevention_tips(&self, crop_type: CropType) -> Vec<&'static str> {
        let mut tips: Vec<&'static str> = Vec::new();
        for threat in self.pests_for_crop(crop_type) {
            if !tips.contains(&threat.prevention) {
                tips.push(threat.prevention);
            }
        }
        tips
    }
}
