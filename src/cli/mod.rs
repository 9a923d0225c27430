//! Tankhouse CLI Module
//!
//! Command-line interface for inspecting prediction types and running
//! predictions against an artifact directory.

use clap::{Parser, Subcommand};
use colored::*;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::catalog::{ParameterCatalog, PredictionTypeRegistry};
use crate::engine::{FeatureVector, PredictionEngine, Violation};
use crate::error::TankhouseError;

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString    { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }

fn step_ok(msg: &str) {
    println!("  {} {}", ok("✓"), msg);
}

fn step_run(msg: &str) {
    print!("  {} {}... ", accent("›"), msg);
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), dim(detail));
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "tankhouse")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Outlet ion concentration prediction for electrolytic copper refining")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List prediction types and their artifact status
    Types {
        /// Directory holding the model and scaler artifacts
        #[arg(short, long, default_value = "models")]
        models: PathBuf,
    },

    /// Show the parameter sheet of a prediction type
    Params {
        /// Prediction type key (OAC_W, OCC_D, OCC_W)
        #[arg(short = 't', long = "type")]
        prediction_type: String,
    },

    /// Check an input file against the allowed parameter ranges
    Check {
        /// Prediction type key (OAC_W, OCC_D, OCC_W)
        #[arg(short = 't', long = "type")]
        prediction_type: String,

        /// JSON file mapping parameter keys to values
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Predict an outlet ion concentration
    Predict {
        /// Prediction type key (OAC_W, OCC_D, OCC_W)
        #[arg(short = 't', long = "type")]
        prediction_type: String,

        /// JSON file mapping parameter keys to values
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Fill every parameter with its built-in default value
        #[arg(long)]
        defaults: bool,

        /// Directory holding the model and scaler artifacts
        #[arg(short, long, default_value = "models")]
        models: PathBuf,
    },
}

// ─── Input loading ─────────────────────────────────────────────────────────────

pub fn read_features(path: &PathBuf) -> anyhow::Result<FeatureVector> {
    let file = std::fs::File::open(path)?;
    let features = serde_json::from_reader(std::io::BufReader::new(file))?;
    Ok(features)
}

fn offline_engine() -> PredictionEngine {
    PredictionEngine::new(
        ParameterCatalog::builtin(),
        PredictionTypeRegistry::builtin(),
        HashMap::new(),
    )
}

fn print_violations(violations: &[Violation]) {
    println!();
    println!("  {}", "The following parameters are out of range:".yellow());
    for v in violations {
        println!("    {}", v);
    }
    println!();
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub fn cmd_types(models_root: &PathBuf) -> anyhow::Result<()> {
    section("Prediction Types");

    let engine = PredictionEngine::load(
        ParameterCatalog::builtin(),
        PredictionTypeRegistry::builtin(),
        models_root,
    );

    println!("  {:<12} {}", muted("Artifacts"), models_root.display());
    println!();
    println!(
        "  {}",
        muted(&format!("{:<8} {:<44} {}", "Key", "Description", "Status"))
    );
    println!("  {}", dim(&"─".repeat(66)));

    for spec in engine.registry().iter() {
        let row = format!("{:<8} {:<44} ", spec.key, spec.description);
        if engine.is_available(&spec.key) {
            println!("  {}{}", row, ok("ready"));
        } else {
            let missing = engine
                .missing_slots(&spec.key)?
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            println!("  {}{}", row, format!("missing: {}", missing).yellow());
        }
    }

    println!();
    Ok(())
}

pub fn cmd_params(type_key: &str) -> anyhow::Result<()> {
    let engine = offline_engine();
    let spec = engine
        .registry()
        .get(type_key)
        .ok_or_else(|| TankhouseError::UnknownPredictionType(type_key.to_string()))?;

    section(&format!("{} Parameters", type_key));
    println!("  {}", muted(&spec.description));
    println!();
    println!(
        "  {}",
        muted(&format!(
            "{:<34} {:<6} {:>10} {:>10} {:>8} {:>10}",
            "Parameter", "Unit", "Min", "Max", "Step", "Default"
        ))
    );
    println!("  {}", dim(&"─".repeat(84)));

    for required in &spec.required {
        if let Some(param) = engine.catalog().get(&required.key) {
            println!(
                "  {:<34} {:<6} {:>10} {:>10} {:>8} {:>10}",
                param.key, param.unit, param.min, param.max, param.step, required.default
            );
        }
    }

    println!();
    println!(
        "  {:<12} {}",
        muted("Output"),
        format!("{} - {} g/L", spec.output_range.min, spec.output_range.max)
    );
    println!("  {:<12} {}", muted("Features"), spec.n_features());
    println!();

    Ok(())
}

pub fn cmd_check(type_key: &str, input: &PathBuf) -> anyhow::Result<()> {
    section("Check");

    step_run(&format!("Reading {}", input.display()));
    let features = read_features(input)?;
    step_done(&format!("{} value(s)", features.len()));

    let violations = offline_engine().validate(type_key, &features)?;
    if violations.is_empty() {
        println!();
        step_ok("all parameters within range");
        println!();
        Ok(())
    } else {
        print_violations(&violations);
        anyhow::bail!("{} parameter(s) outside allowed range", violations.len())
    }
}

pub fn cmd_predict(
    type_key: &str,
    input: Option<&PathBuf>,
    defaults: bool,
    models_root: &PathBuf,
) -> anyhow::Result<()> {
    section("Predict");

    let engine = PredictionEngine::load(
        ParameterCatalog::builtin(),
        PredictionTypeRegistry::builtin(),
        models_root,
    );

    let features = match (input, defaults) {
        (Some(path), false) => read_features(path)?,
        (None, true) => engine.default_features(type_key)?,
        (Some(_), true) => anyhow::bail!("pass either --input or --defaults, not both"),
        (None, false) => anyhow::bail!("an input file (--input) or --defaults is required"),
    };

    match engine.predict(type_key, &features) {
        Ok(outcome) => {
            println!();
            print!(
                "  {}",
                format!("Prediction ion concentration: {:.2} g/L", outcome.value)
                    .white()
                    .bold()
            );
            if !outcome.within_range {
                print!(" {}", "(Out of optimal range)".yellow());
            }
            println!();
            println!(
                "  {}",
                muted(&format!(
                    "Optimal concentration range: {} - {} g/L",
                    outcome.range.min, outcome.range.max
                ))
            );
            println!();
            Ok(())
        }
        Err(TankhouseError::OutOfRange(violations)) => {
            print_violations(&violations);
            anyhow::bail!("input rejected by range validation")
        }
        Err(e) => Err(e.into()),
    }
}
