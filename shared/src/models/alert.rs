//! Farm alert models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What an alert is about
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    Weather,
    Pest,
    Disease,
    Irrigation,
    Harvest,
}

impl AlertType {
    pub const ALL: [AlertType; 5] = [
        AlertType::Weather,
        AlertType::Pest,
        AlertType::Disease,
        AlertType::Irrigation,
        AlertType::Harvest,
    ];
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertType::Weather => write!(f, "Weather Alert"),
            AlertType::Pest => write!(f, "Pest Alert"),
            AlertType::Disease => write!(f, "Disease Alert"),
            AlertType::Irrigation => write!(f, "Irrigation Alert"),
            AlertType::Harvest => write!(f, "Harvest Alert"),
        }
    }
}

/// Alert severity, ordered low < medium < high < critical
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// An alert raised for a farm
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub farm_id: Uuid,
    pub alert_type: AlertType,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
}

/// Identity used to keep alert creation idempotent
pub type AlertKey = (Uuid, AlertType, String);

impl Alert {
    pub fn new(
        farm_id: Uuid,
        alert_type: AlertType,
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            farm_id,
            alert_type,
            severity,
            title: title.into(),
            message: message.into(),
            is_read: false,
        }
    }

    pub fn key(&self) -> AlertKey {
        (self.farm_id, self.alert_type, self.title.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::High < Severity::Critical);
        assert_eq!(
            [Severity::High, Severity::Low, Severity::Critical].iter().max(),
            Some(&Severity::Critical)
        );
    }

    #[test]
    fn test_key_ignores_message_and_severity() {
        let farm = Uuid::new_v4();
        let a =
            Alert::new(farm, AlertType::Weather, Severity::High, "High Temperature Alert", "36°C");
        let mut b = a.clone();
        b.message = "38°C".to_string();
        b.severity = Severity::Critical;
        assert_eq!(a.key(), b.key());
    }
}
