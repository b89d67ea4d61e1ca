//! Body measurements.

use serde::{Deserialize, Serialize};

use super::identity::EntityId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BodyMeasurement {
    pub id: EntityId,
    /// RFC 3339 instant the measurement was taken.
    pub taken_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat_percent: Option<f64>,
    pub notes: String,
    pub photo_ids: Vec<String>,
}

impl Default for BodyMeasurement {
    fn default() -> Self {
        Self {
            id: EntityId::generate(),
            taken_at: String::new(),
            weight_kg: None,
            body_fat_percent: None,
            notes: String::new(),
            photo_ids: Vec::new(),
        }
    }
}
