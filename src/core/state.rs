//! The root aggregate.
//!
//! Exactly one `State` is live in memory per process (owned by the
//! `StateHolder`). All UI-driven operations go through the mutation
//! methods here so the at-most-one-active-workout invariant holds.

use serde::{Deserialize, Serialize};

use super::exercise::{Exercise, ExerciseType};
use super::identity::EntityId;
use super::measurement::BodyMeasurement;
use super::routine::{PlanItem, Routine};
use super::set::{SetEntry, SetTag};
use super::settings::Settings;
use super::time::now_rfc3339;
use super::workout::Workout;

/// Current persisted-document schema version. Gates normalization only,
/// never conflict resolution.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct State {
    pub version: u32,
    /// Epoch-ms logical last-writer clock. 0 means "never written", so any
    /// remote payload with a real timestamp is treated as newer.
    pub last_modified: u64,
    pub settings: Settings,
    pub exercises: Vec<Exercise>,
    pub routines: Vec<Routine>,
    pub workouts: Vec<Workout>,
    pub body_measurements: Vec<BodyMeasurement>,
    pub active_workout_id: Option<EntityId>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            last_modified: 0,
            settings: Settings::default(),
            exercises: Vec::new(),
            routines: Vec::new(),
            workouts: Vec::new(),
            body_measurements: Vec::new(),
            active_workout_id: None,
        }
    }
}

impl State {
    pub fn exercise(&self, id: &EntityId) -> Option<&Exercise> {
        self.exercises.iter().find(|ex| &ex.id == id)
    }

    pub fn routine(&self, id: &EntityId) -> Option<&Routine> {
        self.routines.iter().find(|r| &r.id == id)
    }

    pub fn active_workout(&self) -> Option<&Workout> {
        let id = self.active_workout_id.as_ref()?;
        self.workouts.iter().find(|w| &w.id == id)
    }

    pub fn active_workout_mut(&mut self) -> Option<&mut Workout> {
        let id = self.active_workout_id.clone()?;
        self.workouts.iter_mut().find(|w| w.id == id)
    }

    /// Whether any routine or workout still references this exercise.
    pub fn exercise_in_use(&self, id: &EntityId) -> bool {
        let in_routines = self
            .routines
            .iter()
            .any(|r| r.items.iter().any(|item| &item.exercise_id == id));
        let in_workouts = self
            .workouts
            .iter()
            .any(|w| w.items.iter().any(|item| &item.exercise_id == id));
        in_routines || in_workouts
    }

    /// Start a new workout, optionally seeded from a routine. The new
    /// workout becomes the single active one; a previously active workout
    /// simply stops being active.
    pub fn start_workout(&mut self, routine_id: Option<&EntityId>) -> EntityId {
        let routine = routine_id.and_then(|id| self.routine(id)).cloned();
        let mut workout = Workout {
            created_at: now_rfc3339(),
            bodyweight: Some(self.settings.bodyweight),
            ..Workout::default()
        };
        if let Some(routine) = routine {
            workout.name = routine.name.clone();
            workout.routine_id = Some(routine.id.clone());
            workout.items = routine
                .items
                .iter()
                .map(|item| PlanItem {
                    id: EntityId::generate(),
                    exercise_id: item.exercise_id.clone(),
                    group: item.group.clone(),
                    note: item.note.clone(),
                    sets: item
                        .sets
                        .iter()
                        .map(|set| SetEntry {
                            id: EntityId::generate(),
                            ..set.clone()
                        })
                        .collect(),
                })
                .collect();
        }
        let id = workout.id.clone();
        self.workouts.insert(0, workout);
        self.active_workout_id = Some(id.clone());
        id
    }

    /// End the active workout. Returns false when none is active.
    pub fn end_workout(&mut self) -> bool {
        let ended_at = now_rfc3339();
        match self.active_workout_mut() {
            Some(workout) => {
                workout.ended_at = Some(ended_at);
                self.active_workout_id = None;
                true
            }
            None => false,
        }
    }

    /// Add an exercise to the library. Empty names are refused.
    pub fn add_exercise(
        &mut self,
        name: &str,
        category: &str,
        kind: ExerciseType,
    ) -> Option<EntityId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let exercise = Exercise {
            name: name.to_string(),
            category: category.trim().to_string(),
            kind,
            ..Exercise::default()
        };
        let id = exercise.id.clone();
        self.exercises.push(exercise);
        Some(id)
    }

    /// Delete an exercise unless it is still referenced.
    pub fn delete_exercise(&mut self, id: &EntityId) -> bool {
        if self.exercise_in_use(id) {
            return false;
        }
        let before = self.exercises.len();
        self.exercises.retain(|ex| &ex.id != id);
        self.exercises.len() != before
    }

    pub fn create_routine(&mut self, name: &str) -> Option<EntityId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let routine = Routine {
            name: name.to_string(),
            ..Routine::default()
        };
        let id = routine.id.clone();
        self.routines.push(routine);
        Some(id)
    }

    pub fn delete_routine(&mut self, id: &EntityId) {
        self.routines.retain(|r| &r.id != id);
    }

    /// Add an exercise slot to the active workout.
    pub fn add_workout_item(&mut self, exercise_id: &EntityId, group: &str) -> Option<EntityId> {
        if self.exercise(exercise_id).is_none() {
            return None;
        }
        let item = PlanItem {
            exercise_id: exercise_id.clone(),
            group: group.trim().to_string(),
            ..PlanItem::default()
        };
        let id = item.id.clone();
        self.active_workout_mut()?.items.push(item);
        Some(id)
    }

    /// Append a set to an item of the active workout, typed after its exercise.
    pub fn add_set(&mut self, item_id: &EntityId, tag: SetTag) -> Option<EntityId> {
        let kind = {
            let workout = self.active_workout()?;
            let item = workout.items.iter().find(|item| &item.id == item_id)?;
            self.exercise(&item.exercise_id)?.kind
        };
        let workout = self.active_workout_mut()?;
        let item = workout.items.iter_mut().find(|item| &item.id == item_id)?;
        let set = SetEntry {
            kind,
            tag,
            ..SetEntry::default()
        };
        let id = set.id.clone();
        item.sets.push(set);
        Some(id)
    }
}
