//! `forge` - offline surface over the local store: inspect, import, export.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use forge_log::export::{export_csv, export_json, import_json};
use forge_log::{LocalStore, StateHolder, telemetry};

#[derive(Parser)]
#[command(name = "forge", about = "Local-first fitness log", version)]
struct Cli {
    /// Increase log verbosity (-v, -vv, ...)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize the local state document
    Show,
    /// Export the full state as pretty-printed JSON
    ExportJson {
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Export one row per logged set as CSV
    ExportCsv {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace the local state with a JSON backup
    Import { file: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> forge_log::Result<()> {
    let mut holder = StateHolder::open(LocalStore::open_default())?;

    match command {
        Command::Show => {
            let state = holder.state();
            println!("exercises:        {}", state.exercises.len());
            println!("routines:         {}", state.routines.len());
            println!("workouts:         {}", state.workouts.len());
            println!("bodyMeasurements: {}", state.body_measurements.len());
            println!(
                "activeWorkout:    {}",
                state
                    .active_workout()
                    .map(|w| w.name.as_str())
                    .unwrap_or("none")
            );
            println!("lastModified:     {}", state.last_modified);
        }
        Command::ExportJson { out } => {
            emit(out, &export_json(holder.state()))?;
        }
        Command::ExportCsv { out } => {
            emit(out, &export_csv(holder.state()))?;
        }
        Command::Import { file } => {
            let raw = fs::read_to_string(&file).map_err(|e| {
                forge_log::Error::Store(forge_log::store::StoreError::Read {
                    path: file.clone(),
                    source: e,
                })
            })?;
            let state = import_json(&raw)?;
            let stamp = state.last_modified;
            holder
                .replace(state, stamp)
                .map_err(forge_log::Error::Store)?;
            println!("import complete");
        }
    }

    Ok(())
}

fn emit(out: Option<PathBuf>, contents: &str) -> forge_log::Result<()> {
    match out {
        Some(path) => {
            fs::write(&path, contents).map_err(|e| {
                forge_log::Error::Store(forge_log::store::StoreError::Write {
                    path: path.clone(),
                    source: e,
                })
            })?;
        }
        None => println!("{contents}"),
    }
    Ok(())
}
