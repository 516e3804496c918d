//! Chartexpr Run - Executes a chart expression program from the command line
//!
//! Loads input charts from JSON files, runs the program through every phase
//! and prints either the resulting bindings or the phase-tagged diagnostics.
//! Exits with status 1 when the program fails.

use anyhow::{bail, Context, Result};
use chartexpr::{run, Chart, ChartMap, RunFailure, RunSuccess, RuntimeValue, Timestamp};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "chartexpr-run")]
#[command(about = "Run a chart expression program against input charts")]
struct Cli {
    /// Path to the program source
    #[arg(required_unless_present = "expr", conflicts_with = "expr")]
    program: Option<PathBuf>,

    /// Program source given inline
    #[arg(long, short = 'e')]
    expr: Option<String>,

    /// JSON file with a map of chart name to chart (repeatable)
    #[arg(long = "charts", short = 'c')]
    charts: Vec<PathBuf>,

    /// Fixed RFC 3339 instant for now(); defaults to the system clock
    #[arg(long, value_parser = parse_instant)]
    now: Option<Timestamp>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn parse_instant(s: &str) -> Result<Timestamp, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 instant: {}", e))
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chartexpr_run=info,chartexpr=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match execute(&cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!("{:#}", e);
            std::process::exit(2);
        }
    }
}

/// Returns whether the program ran successfully.
fn execute(cli: &Cli) -> Result<bool> {
    let source = match (&cli.program, &cli.expr) {
        (_, Some(expr)) => expr.clone(),
        (Some(path), None) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read program {}", path.display()))?,
        (None, None) => bail!("no program given"),
    };

    let mut charts = ChartMap::new();
    for path in &cli.charts {
        let loaded = load_charts(path)?;
        info!("Loaded {} chart(s) from {}", loaded.len(), path.display());
        charts.extend(loaded);
    }

    let fixed = cli.now;
    let clock = move || fixed.unwrap_or_else(Utc::now);
    debug!(now = ?cli.now, "running program");

    let outcome = run(&source, &charts, &clock);
    match cli.format {
        Format::Text => print_text(&outcome),
        Format::Json => print_json(&outcome)?,
    }
    Ok(outcome.is_ok())
}

fn load_charts(path: &Path) -> Result<ChartMap> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read charts {}", path.display()))?;
    let charts: IndexMap<String, Chart> = serde_json::from_str(&text)
        .with_context(|| format!("invalid chart JSON in {}", path.display()))?;
    Ok(charts
        .into_iter()
        .map(|(name, chart)| (name, Rc::new(chart)))
        .collect())
}

fn print_text(outcome: &Result<RunSuccess, RunFailure>) {
    match outcome {
        Ok(success) => {
            for (name, value) in &success.variables {
                println!("{} = {}", name, value);
                if let RuntimeValue::Chart(chart) = value {
                    print_points(chart);
                }
            }
        }
        Err(failure) => {
            println!("{} failed:", failure.phase());
            for report in failure.diagnostics() {
                match report.location {
                    Some(at) => println!(
                        "  [{}] line {}, column {}: {}",
                        report.code, at.line, at.column, report.message
                    ),
                    None => println!("  [{}] {}", report.code, report.message),
                }
            }
        }
    }
}

fn print_points(chart: &Chart) {
    match chart {
        Chart::Time(series) => {
            for p in &series.points {
                println!("  {}  {}", p.x.to_rfc3339(), p.y);
            }
        }
        Chart::Numeric(series) => {
            for p in &series.points {
                println!("  {}  {}", p.x, p.y);
            }
        }
        Chart::Category(series) => {
            for p in &series.points {
                println!("  {}  {}", p.x, p.y);
            }
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "phase", rename_all = "kebab-case")]
enum JsonOutcome<'a> {
    Success {
        variables: &'a IndexMap<String, RuntimeValue>,
    },
    Failure {
        failed_phase: &'static str,
        errors: Vec<chartexpr::DiagnosticReport>,
    },
}

fn print_json(outcome: &Result<RunSuccess, RunFailure>) -> Result<()> {
    let output = match outcome {
        Ok(success) => JsonOutcome::Success {
            variables: &success.variables,
        },
        Err(failure) => JsonOutcome::Failure {
            failed_phase: failure.phase(),
            errors: failure.diagnostics(),
        },
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
