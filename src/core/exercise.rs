//! The exercise library.

use serde::{Deserialize, Serialize};

use super::identity::EntityId;

/// How a set against this exercise is measured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    /// External load x reps.
    #[default]
    Weight,
    /// Bodyweight minus assistance x reps.
    Assisted,
    /// Time (and optional distance).
    Duration,
}

impl ExerciseType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "weight" => Some(Self::Weight),
            "assisted" => Some(Self::Assisted),
            "duration" => Some(Self::Duration),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Exercise {
    pub id: EntityId,
    pub name: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: ExerciseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl Default for Exercise {
    fn default() -> Self {
        Self {
            id: EntityId::generate(),
            name: String::new(),
            category: String::new(),
            kind: ExerciseType::Weight,
            instructions: None,
            video_url: None,
        }
    }
}
