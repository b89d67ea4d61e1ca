//! Workout templates.

use serde::{Deserialize, Serialize};

use super::identity::EntityId;
use super::set::SetEntry;

/// One exercise slot inside a routine or a logged workout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanItem {
    pub id: EntityId,
    pub exercise_id: EntityId,
    /// Superset group label; empty for a standalone exercise.
    pub group: String,
    pub note: String,
    pub sets: Vec<SetEntry>,
}

impl Default for PlanItem {
    fn default() -> Self {
        Self {
            id: EntityId::generate(),
            exercise_id: EntityId::new(""),
            group: String::new(),
            note: String::new(),
            sets: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Routine {
    pub id: EntityId,
    pub name: String,
    pub items: Vec<PlanItem>,
}

impl Default for Routine {
    fn default() -> Self {
        Self {
            id: EntityId::generate(),
            name: String::new(),
            items: Vec::new(),
        }
    }
}
