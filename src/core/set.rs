//! A single logged set.

use serde::{Deserialize, Serialize};

use super::exercise::ExerciseType;
use super::identity::EntityId;

/// Label applied to a set; drives the rest-timer preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetTag {
    #[default]
    Work,
    Warmup,
    Failure,
    Drop,
}

impl SetTag {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "work" => Some(Self::Work),
            "warmup" => Some(Self::Warmup),
            "failure" => Some(Self::Failure),
            "drop" => Some(Self::Drop),
            _ => None,
        }
    }
}

/// One set. Which measurement fields apply depends on `kind`; the others
/// stay `None` and are omitted from the wire form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SetEntry {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub kind: ExerciseType,
    pub tag: SetTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assist: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_sec: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl Default for SetEntry {
    fn default() -> Self {
        Self {
            id: EntityId::generate(),
            kind: ExerciseType::Weight,
            tag: SetTag::Work,
            weight: None,
            reps: None,
            assist: None,
            duration_sec: None,
            distance: None,
        }
    }
}

impl SetEntry {
    /// Load actually moved: the entered weight, or bodyweight minus
    /// assistance for assisted work. Duration sets carry no load.
    pub fn effective_weight(&self, bodyweight: f64) -> f64 {
        match self.kind {
            ExerciseType::Weight => self.weight.unwrap_or(0.0),
            ExerciseType::Assisted => (bodyweight - self.assist.unwrap_or(0.0)).max(0.0),
            ExerciseType::Duration => 0.0,
        }
    }

    /// Tonnage for this set (effective weight x reps), 0 when either is missing.
    pub fn volume(&self, bodyweight: f64) -> f64 {
        let weight = self.effective_weight(bodyweight);
        match self.reps {
            Some(reps) if weight > 0.0 => weight * f64::from(reps),
            _ => 0.0,
        }
    }
}
