//! CLI smoke tests over a throwaway data directory.

use assert_cmd::Command;
use predicates::prelude::*;

fn forge(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("forge").expect("binary");
    cmd.env("FORGE_DATA_DIR", dir.path());
    cmd
}

#[test]
fn show_on_a_fresh_data_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    forge(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("workouts:         0"))
        .stdout(predicate::str::contains("activeWorkout:    none"));
}

#[test]
fn import_then_export_roundtrip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let backup = dir.path().join("backup.json");
    std::fs::write(
        &backup,
        r#"{ "settings": { "restSeconds": 80 }, "lastModified": 123 }"#,
    )
    .expect("write backup");

    forge(&dir)
        .arg("import")
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("import complete"));

    forge(&dir)
        .arg("export-json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"restSecondsWork\": 80"))
        .stdout(predicate::str::contains("\"restSecondsDrop\": 40"))
        .stdout(predicate::str::contains("\"lastModified\": 123"));
}

#[test]
fn export_csv_emits_the_header() {
    let dir = tempfile::tempdir().expect("tempdir");
    forge(&dir)
        .arg("export-csv")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Date,Workout,Exercise,Type,Set,WeightKg,AssistKg,Reps,DurationSec,Tag,VolumeKg,Notes",
        ));
}

#[test]
fn import_of_invalid_json_fails_loudly() {
    let dir = tempfile::tempdir().expect("tempdir");
    let backup = dir.path().join("backup.json");
    std::fs::write(&backup, "not json").expect("write backup");

    forge(&dir)
        .arg("import")
        .arg(&backup)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}
