//! Schema normalization: total coercion of arbitrary JSON into the
//! current `State` shape.
//!
//! Every load path (local store, remote pull, file import) funnels raw
//! JSON through [`normalize`]. It never fails: structurally invalid input
//! degrades to defaults for the offending sub-tree instead of aborting
//! the whole normalization. Callers only guard the outer parse.

use serde_json::Value;

use crate::core::{
    BodyMeasurement, EntityId, Exercise, ExerciseType, OneRmFormula, PlanItem, Routine, SetEntry,
    SetTag, Settings, State, Workout, SCHEMA_VERSION,
};

/// Identifiers of the demo exercises seeded by early releases. Filtered
/// unconditionally so removed seed content never resurfaces after an
/// update.
pub const LEGACY_SEED_IDS: &[&str] = &[
    "ex-bench",
    "ex-incline-db",
    "ex-overhead-press",
    "ex-pushup",
    "ex-dips",
    "ex-chest-fly",
    "ex-deadlift",
    "ex-row",
    "ex-db-row",
    "ex-pullup",
    "ex-assisted-pullup",
    "ex-lat-pulldown",
    "ex-back-squat",
    "ex-front-squat",
    "ex-rdl",
    "ex-leg-press",
    "ex-leg-curl",
    "ex-leg-extension",
    "ex-calf-raise",
    "ex-walking-lunge",
    "ex-hip-thrust",
    "ex-barbell-curl",
    "ex-hammer-curl",
    "ex-tri-pushdown",
    "ex-skull",
    "ex-plank",
    "ex-hanging-leg",
    "ex-russian-twist",
    "ex-run",
    "ex-cycle",
    "ex-rowing",
    "ex-jumprope",
    "ex-stair",
    "ex-elliptical",
    "ex-clean-press",
    "ex-kb-swing",
];

/// Coerce raw JSON into the current canonical shape. Total: never panics,
/// never errors.
pub fn normalize(raw: &Value) -> State {
    let mut state = State::default();
    state.version = SCHEMA_VERSION;
    state.settings = merge_settings(raw.get("settings").unwrap_or(&Value::Null));
    state.exercises = coerce_collection(raw.get("exercises"), coerce_exercise);
    state
        .exercises
        .retain(|ex| !LEGACY_SEED_IDS.contains(&ex.id.as_str()));
    state.routines = coerce_collection(raw.get("routines"), coerce_routine);
    state.workouts = coerce_collection(raw.get("workouts"), coerce_workout);
    state.body_measurements = coerce_collection(raw.get("bodyMeasurements"), coerce_measurement);
    state.active_workout_id = raw
        .get("activeWorkoutId")
        .and_then(nonempty_string)
        .map(EntityId::new);
    state.last_modified = raw
        .get("lastModified")
        .and_then(finite_f64)
        .filter(|ms| *ms >= 0.0)
        .map(|ms| ms as u64)
        .unwrap_or(0);
    state
}

/// Shallow-merge raw settings over defaults, field by field, applying the
/// one-time legacy key rules.
fn merge_settings(raw: &Value) -> Settings {
    let mut settings = Settings::default();

    if let Some(units) = raw.get("units").and_then(nonempty_string) {
        settings.units = units;
    }
    if let Some(work) = raw.get("restSecondsWork").and_then(finite_seconds) {
        settings.rest_seconds_work = work;
    }
    if let Some(warmup) = raw.get("restSecondsWarmup").and_then(finite_seconds) {
        settings.rest_seconds_warmup = warmup;
    }
    if let Some(drop) = raw.get("restSecondsDrop").and_then(finite_seconds) {
        settings.rest_seconds_drop = drop;
    }

    // Legacy single "restSeconds" fans out into the typed rest fields,
    // but only where the newer fields were absent.
    if let Some(legacy) = raw.get("restSeconds").and_then(finite_f64) {
        if raw.get("restSecondsWork").and_then(finite_seconds).is_none() {
            settings.rest_seconds_work = legacy.round().max(0.0) as u32;
        }
        if raw
            .get("restSecondsWarmup")
            .and_then(finite_seconds)
            .is_none()
        {
            settings.rest_seconds_warmup = ((legacy * 0.7).round() as u32).max(10);
        }
        if raw.get("restSecondsDrop").and_then(finite_seconds).is_none() {
            settings.rest_seconds_drop = ((legacy * 0.5).round() as u32).max(10);
        }
    }

    // autoRest was introduced after 1.0; absent means the safe default (on).
    if let Some(auto_rest) = raw.get("autoRest").and_then(Value::as_bool) {
        settings.auto_rest = auto_rest;
    }
    if let Some(percents) = raw.get("warmupPercents").and_then(finite_array) {
        settings.warmup_percents = percents;
    }
    if let Some(bar_weight) = raw.get("barWeight").and_then(finite_f64) {
        settings.bar_weight = bar_weight;
    }
    if let Some(plates) = raw.get("plates").and_then(finite_array) {
        settings.plates = plates;
    }
    if let Some(bodyweight) = raw.get("bodyweight").and_then(finite_f64) {
        settings.bodyweight = bodyweight;
    }
    if let Some(formula) = raw
        .get("oneRmFormula")
        .and_then(Value::as_str)
        .and_then(OneRmFormula::parse)
    {
        settings.one_rm_formula = formula;
    }

    settings
}

/// Non-array raw values become an empty collection; non-object elements
/// are dropped rather than invented.
fn coerce_collection<T>(raw: Option<&Value>, coerce: fn(&Value) -> Option<T>) -> Vec<T> {
    match raw.and_then(Value::as_array) {
        Some(items) => items.iter().filter_map(coerce).collect(),
        None => Vec::new(),
    }
}

fn coerce_exercise(raw: &Value) -> Option<Exercise> {
    raw.as_object()?;
    Some(Exercise {
        id: coerce_id(raw),
        name: trimmed_string(raw.get("name")),
        category: trimmed_string(raw.get("category")),
        kind: coerce_exercise_type(raw.get("type")),
        instructions: raw.get("instructions").and_then(nonempty_string),
        video_url: raw.get("videoUrl").and_then(nonempty_string),
    })
}

fn coerce_routine(raw: &Value) -> Option<Routine> {
    raw.as_object()?;
    Some(Routine {
        id: coerce_id(raw),
        name: trimmed_string(raw.get("name")),
        items: coerce_collection(raw.get("items"), coerce_plan_item),
    })
}

fn coerce_workout(raw: &Value) -> Option<Workout> {
    raw.as_object()?;
    let name = trimmed_string(raw.get("name"));
    Some(Workout {
        id: coerce_id(raw),
        name: if name.is_empty() {
            "Workout".to_string()
        } else {
            name
        },
        created_at: trimmed_string(raw.get("createdAt")),
        ended_at: raw.get("endedAt").and_then(nonempty_string),
        routine_id: raw.get("routineId").and_then(nonempty_string).map(EntityId::new),
        bodyweight: raw.get("bodyweight").and_then(finite_f64),
        notes: trimmed_string(raw.get("notes")),
        photo_ids: coerce_string_list(raw.get("photoIds")),
        items: coerce_collection(raw.get("items"), coerce_plan_item),
    })
}

fn coerce_plan_item(raw: &Value) -> Option<PlanItem> {
    raw.as_object()?;
    Some(PlanItem {
        id: coerce_id(raw),
        exercise_id: EntityId::new(trimmed_string(raw.get("exerciseId"))),
        group: trimmed_string(raw.get("group")),
        note: trimmed_string(raw.get("note")),
        sets: coerce_collection(raw.get("sets"), coerce_set),
    })
}

fn coerce_set(raw: &Value) -> Option<SetEntry> {
    raw.as_object()?;
    Some(SetEntry {
        id: coerce_id(raw),
        kind: coerce_exercise_type(raw.get("type")),
        tag: raw
            .get("tag")
            .and_then(Value::as_str)
            .and_then(SetTag::parse)
            .unwrap_or_default(),
        weight: raw.get("weight").and_then(finite_f64),
        reps: raw
            .get("reps")
            .and_then(finite_f64)
            .filter(|n| *n >= 0.0)
            .map(|n| n as u32),
        assist: raw.get("assist").and_then(finite_f64),
        duration_sec: raw.get("durationSec").and_then(finite_f64),
        distance: raw.get("distance").and_then(finite_f64),
    })
}

fn coerce_measurement(raw: &Value) -> Option<BodyMeasurement> {
    raw.as_object()?;
    Some(BodyMeasurement {
        id: coerce_id(raw),
        taken_at: trimmed_string(raw.get("takenAt")),
        weight_kg: raw.get("weightKg").and_then(finite_f64),
        body_fat_percent: raw.get("bodyFatPercent").and_then(finite_f64),
        notes: trimmed_string(raw.get("notes")),
        photo_ids: coerce_string_list(raw.get("photoIds")),
    })
}

fn coerce_exercise_type(raw: Option<&Value>) -> ExerciseType {
    raw.and_then(Value::as_str)
        .and_then(ExerciseType::parse)
        .unwrap_or_default()
}

/// Carry a present identifier verbatim, assign a fresh one when missing.
fn coerce_id(raw: &Value) -> EntityId {
    match raw.get("id").and_then(nonempty_string) {
        Some(id) => EntityId::new(id),
        None => EntityId::generate(),
    }
}

fn trimmed_string(raw: Option<&Value>) -> String {
    raw.and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn nonempty_string(raw: &Value) -> Option<String> {
    let trimmed = raw.as_str()?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn finite_f64(raw: &Value) -> Option<f64> {
    raw.as_f64().filter(|v| v.is_finite())
}

fn finite_seconds(raw: &Value) -> Option<u32> {
    finite_f64(raw)
        .filter(|v| *v >= 0.0)
        .map(|v| v.round() as u32)
}

fn finite_array(raw: &Value) -> Option<Vec<f64>> {
    let items = raw.as_array()?;
    Some(items.iter().filter_map(finite_f64).collect())
}

fn coerce_string_list(raw: Option<&Value>) -> Vec<String> {
    match raw.and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        None => Vec::new(),
    }
}
