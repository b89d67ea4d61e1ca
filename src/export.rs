//! File import/export.
//!
//! Export emits the full state as pretty-printed JSON and as a flattened
//! per-set CSV. Import accepts a JSON file, runs it through the same
//! normalizer as a local load, and replaces the state wholesale (never a
//! merge).

use thiserror::Error;

use crate::core::{ExerciseType, State};
use crate::normalize::normalize;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("import failed: not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Full state as pretty-printed JSON (the backup format).
pub fn export_json(state: &State) -> String {
    serde_json::to_string_pretty(state).unwrap_or_else(|_| "{}".to_string())
}

/// Parse and normalize an imported backup. Anything JSON-parseable
/// succeeds; structure problems degrade to defaults inside `normalize`.
pub fn import_json(raw: &str) -> Result<State, ImportError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    Ok(normalize(&value))
}

const CSV_HEADER: &[&str] = &[
    "Date",
    "Workout",
    "Exercise",
    "Type",
    "Set",
    "WeightKg",
    "AssistKg",
    "Reps",
    "DurationSec",
    "Tag",
    "VolumeKg",
    "Notes",
];

/// One row per logged set.
pub fn export_csv(state: &State) -> String {
    let mut rows: Vec<String> = Vec::new();
    rows.push(CSV_HEADER.join(","));

    for workout in &state.workouts {
        let bodyweight = workout.bodyweight.unwrap_or(state.settings.bodyweight);
        for item in &workout.items {
            let exercise_name = state
                .exercise(&item.exercise_id)
                .map(|ex| ex.name.as_str())
                .unwrap_or("Unknown");
            for (idx, set) in item.sets.iter().enumerate() {
                let weight = match set.kind {
                    ExerciseType::Weight => set.weight.unwrap_or(0.0),
                    _ => set.effective_weight(bodyweight),
                };
                let volume = match set.kind {
                    ExerciseType::Duration => String::new(),
                    _ => format!("{:.1}", set.volume(bodyweight)),
                };
                let fields = [
                    workout.created_at.clone(),
                    workout.name.clone(),
                    exercise_name.to_string(),
                    enum_label(&set.kind),
                    (idx + 1).to_string(),
                    positive_num(weight),
                    set.assist
                        .filter(|_| set.kind == ExerciseType::Assisted)
                        .map(fmt_num)
                        .unwrap_or_default(),
                    set.reps.map(|r| r.to_string()).unwrap_or_default(),
                    set.duration_sec.map(fmt_num).unwrap_or_default(),
                    enum_label(&set.tag),
                    volume,
                    workout.notes.clone(),
                ];
                let row: Vec<String> = fields.iter().map(|f| csv_escape(f)).collect();
                rows.push(row.join(","));
            }
        }
    }

    rows.join("\n")
}

fn enum_label<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn fmt_num(value: f64) -> String {
    format!("{value}")
}

fn positive_num(value: f64) -> String {
    if value > 0.0 {
        fmt_num(value)
    } else {
        String::new()
    }
}

/// RFC-4180 quoting for fields containing commas, quotes or newlines.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
