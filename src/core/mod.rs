//! Core domain types for the fitness log.
//!
//! Module hierarchy follows type dependency order:
//! - time: wall-clock stamps (the last-writer clock)
//! - identity: EntityId, UserId
//! - settings: user preferences
//! - exercise: the exercise library
//! - set: a single logged set
//! - routine: workout templates
//! - workout: logged sessions
//! - measurement: body measurements
//! - state: the root aggregate

pub mod exercise;
pub mod identity;
pub mod measurement;
pub mod routine;
pub mod set;
pub mod settings;
pub mod state;
pub mod time;
pub mod workout;

pub use exercise::{Exercise, ExerciseType};
pub use identity::{EntityId, UserId};
pub use measurement::BodyMeasurement;
pub use routine::{PlanItem, Routine};
pub use set::{SetEntry, SetTag};
pub use settings::{OneRmFormula, Settings};
pub use state::{State, SCHEMA_VERSION};
pub use time::WallClock;
pub use workout::Workout;
