//! Logged workout sessions.

use serde::{Deserialize, Serialize};

use super::identity::EntityId;
use super::routine::PlanItem;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Workout {
    pub id: EntityId,
    pub name: String,
    /// RFC 3339 creation instant.
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routine_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bodyweight: Option<f64>,
    pub notes: String,
    /// Opaque keys into the binary attachment store; the blobs themselves
    /// are synchronized independently and never enter the JSON payload.
    pub photo_ids: Vec<String>,
    pub items: Vec<PlanItem>,
}

impl Default for Workout {
    fn default() -> Self {
        Self {
            id: EntityId::generate(),
            name: "Workout".to_string(),
            created_at: String::new(),
            ended_at: None,
            routine_id: None,
            bodyweight: None,
            notes: String::new(),
            photo_ids: Vec::new(),
            items: Vec::new(),
        }
    }
}

impl Workout {
    /// Total tonnage across all non-duration sets.
    pub fn volume(&self, fallback_bodyweight: f64) -> f64 {
        let bodyweight = self.bodyweight.unwrap_or(fallback_bodyweight);
        self.items
            .iter()
            .flat_map(|item| item.sets.iter())
            .map(|set| set.volume(bodyweight))
            .sum()
    }
}
