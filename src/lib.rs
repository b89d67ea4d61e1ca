#![forbid(unsafe_code)]

pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod holder;
pub mod normalize;
pub mod paths;
pub mod store;
pub mod sync;
pub mod telemetry;

pub use error::{Error, Transience};
pub type Result<T> = std::result::Result<T, Error>;

// Re-export core types at crate root for convenience
pub use crate::core::{
    BodyMeasurement, EntityId, Exercise, ExerciseType, OneRmFormula, PlanItem, Routine, SetEntry,
    SetTag, Settings, State, UserId, WallClock, Workout, SCHEMA_VERSION,
};
pub use crate::holder::StateHolder;
pub use crate::normalize::normalize;
pub use crate::store::LocalStore;
pub use crate::sync::{PullDecision, RemoteRecord, RemoteStore, SyncEngine, SyncEvent, SyncPhase};
