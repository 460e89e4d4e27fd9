//! # Ceiling Estimator CLI
//!
//! Terminal front end for `ceiling_core`. Measures one room (from flags, or
//! interactively for anything left out) or manages a multi-room `.fce`
//! estimate file.
//!
//! Set `RUST_LOG=debug` to see layout details on stderr.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ceiling_core::file_io::{load_estimate, load_estimate_with_lock_check, save_estimate, save_new_estimate, FileLock};
use ceiling_core::report::{bill_of_materials, format_lengths};
use ceiling_core::{calculate_ceiling_requirements, CalcError, CeilingCalculation, Estimate, LayoutConfig, LengthUnit, Room, RoomDimensions};

#[derive(Parser)]
#[command(name = "ceiling_cli")]
#[command(about = "False-ceiling grid material estimator", long_about = None)]
struct Cli {
    /// JSON file overriding stock sizes, spacings and thresholds
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate materials for a single room
    Room {
        #[command(flatten)]
        dimensions: DimensionArgs,

        /// Unit for displayed lengths (defaults to the input unit)
        #[arg(long)]
        display_unit: Option<LengthUnit>,

        /// Print the result as JSON only
        #[arg(long)]
        json: bool,
    },
    /// Work with a multi-room estimate file
    Estimate {
        #[command(subcommand)]
        action: EstimateAction,
    },
}

#[derive(Subcommand)]
enum EstimateAction {
    /// Create a new, empty estimate file
    New {
        file: PathBuf,
        #[arg(long, default_value = "")]
        estimator: String,
        #[arg(long, default_value = "")]
        job: String,
        #[arg(long, default_value = "")]
        client: String,
    },
    /// Add a room to an estimate file
    Add {
        file: PathBuf,
        /// Room label
        #[arg(long)]
        label: String,
        #[command(flatten)]
        dimensions: DimensionArgs,
    },
    /// Print the bill of materials for every room
    Show {
        file: PathBuf,
        /// Unit for displayed lengths
        #[arg(long, default_value = "ft")]
        unit: LengthUnit,
        /// Print the takeoffs as JSON only
        #[arg(long)]
        json: bool,
    },
}

/// Wall measurements; any value left out is asked for on stdin.
#[derive(Args)]
struct DimensionArgs {
    #[arg(long)]
    length1: Option<f64>,
    #[arg(long)]
    length2: Option<f64>,
    #[arg(long)]
    width1: Option<f64>,
    #[arg(long)]
    width2: Option<f64>,
    /// Drop from the slab to the grid
    #[arg(long)]
    linter: Option<f64>,
    /// Unit the measurements are in (ft, mm, cm, in, m, yd)
    #[arg(long, default_value = "ft")]
    unit: LengthUnit,
}

impl DimensionArgs {
    fn resolve(&self) -> Result<RoomDimensions, CalcError> {
        let unit = self.unit;
        let value = |given: Option<f64>, field: &str| match given {
            Some(v) => Ok(v),
            None => prompt_f64(&format!("Enter {} ({}): ", field, unit), field),
        };
        let length1 = value(self.length1, "length1")?;
        let length2 = value(self.length2, "length2")?;
        let width1 = value(self.width1, "width1")?;
        let width2 = value(self.width2, "width2")?;
        let linter = value(self.linter, "linter spacing")?;
        Ok(RoomDimensions::from_unit(length1, length2, width1, width2, linter, unit))
    }
}

fn prompt_f64(prompt: &str, field: &str) -> Result<f64, CalcError> {
    print!("{}", prompt);
    io::stdout().flush().map_err(|_| CalcError::missing_field(field))?;

    let mut input = String::new();
    let read = io::stdin().lock().read_line(&mut input).map_err(|_| CalcError::missing_field(field))?;
    if read == 0 || input.trim().is_empty() {
        return Err(CalcError::missing_field(field));
    }

    input
        .trim()
        .parse()
        .map_err(|_| CalcError::invalid_input(field, input.trim(), "Please enter a numeric value"))
}

fn load_config(path: Option<&Path>) -> Result<LayoutConfig> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };
    let contents = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    let config: LayoutConfig =
        serde_json::from_str(&contents).with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;
    tracing::debug!("using layout config from {}", path.display());
    Ok(config)
}

fn user_id() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "ceiling_cli".to_string())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<CalcError>() {
                Some(calc_error) => report_error(calc_error),
                None => eprintln!("Error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Room {
            dimensions,
            display_unit,
            json,
        } => run_room(&dimensions, display_unit, json, &config),
        Commands::Estimate { action } => run_estimate(action, &config),
    }
}

fn run_room(args: &DimensionArgs, display_unit: Option<LengthUnit>, json: bool, config: &LayoutConfig) -> Result<()> {
    let dimensions = args.resolve()?;
    let calc = calculate_ceiling_requirements(&dimensions, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&calc)?);
    } else {
        print_takeoff("CEILING MATERIALS", &calc, display_unit.unwrap_or(args.unit));
    }
    Ok(())
}

fn run_estimate(action: EstimateAction, config: &LayoutConfig) -> Result<()> {
    match action {
        EstimateAction::New {
            file,
            estimator,
            job,
            client,
        } => {
            let _lock = FileLock::acquire(&file, user_id())?;
            let mut estimate = Estimate::new(estimator, job, client);
            estimate.settings = config.clone();
            save_new_estimate(&estimate, &file)?;
            println!("Created {}", file.display());
        }
        EstimateAction::Add { file, label, dimensions } => {
            let _lock = FileLock::acquire(&file, user_id())?;
            let mut estimate = load_estimate(&file)?;
            let room = Room::new(label, dimensions.resolve()?);
            calculate_ceiling_requirements(&room.dimensions, &estimate.settings)?;
            let id = estimate.add_room(room);
            save_estimate(&estimate, &file)?;
            println!("Added room {} to {}", id, file.display());
        }
        EstimateAction::Show { file, unit, json } => {
            let (estimate, lock) = load_estimate_with_lock_check(&file)?;
            if let Some(info) = lock {
                eprintln!("Note: {} is open by {} ({})", file.display(), info.user_id, info.machine);
            }
            let takeoffs = estimate.calculate_all()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&takeoffs)?);
                return Ok(());
            }
            println!("Job {}  Client: {}  Estimator: {}", estimate.meta.job_id, estimate.meta.client, estimate.meta.estimator);
            if takeoffs.is_empty() {
                println!("No rooms yet. Add one with `ceiling_cli estimate add`.");
            }
            for takeoff in &takeoffs {
                println!();
                print_takeoff(&takeoff.label, &takeoff.calculation, unit);
            }
        }
    }
    Ok(())
}

fn print_takeoff(title: &str, calc: &CeilingCalculation, unit: LengthUnit) {
    println!("═══════════════════════════════════════");
    println!("  {}", title);
    println!("═══════════════════════════════════════");
    for line in bill_of_materials(calc, unit) {
        println!("  {}", line);
    }
    println!();
    println!("  Main rod runs:  {}", format_lengths(&calc.main_lengths, unit).join(", "));
    println!("  Cross rod runs: {}", format_lengths(&calc.cross_lengths, unit).join(", "));
}

fn report_error(e: &CalcError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_room_command() {
        let cli = Cli::try_parse_from([
            "ceiling_cli", "room", "--length1", "3.6576", "--length2", "3.6576", "--width1", "3.6576", "--width2",
            "3.6576", "--linter", "0.6096", "--unit", "m", "--display-unit", "ft",
        ])
        .unwrap();
        let Commands::Room { dimensions, display_unit, json } = cli.command else {
            panic!("expected room command");
        };
        assert_eq!(display_unit, Some(LengthUnit::Feet));
        assert!(!json);

        let room = dimensions.resolve().unwrap();
        assert!((room.length1 - 12.0).abs() < 1e-9);
        assert!((room.linter_spacing - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_unit_rejected() {
        let parsed = Cli::try_parse_from(["ceiling_cli", "room", "--unit", "furlong"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_parse_estimate_add() {
        let cli = Cli::try_parse_from([
            "ceiling_cli", "--config", "layout.json", "estimate", "add", "job.fce", "--label", "Lobby", "--length1", "20",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("layout.json")));
        let Commands::Estimate { action: EstimateAction::Add { label, dimensions, .. } } = cli.command else {
            panic!("expected estimate add");
        };
        assert_eq!(label, "Lobby");
        assert_eq!(dimensions.length1, Some(20.0));
        assert_eq!(dimensions.width1, None);
        assert_eq!(dimensions.unit, LengthUnit::Feet);
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ceiling_cli_test_{}_{}.fce", name, std::process::id()))
    }

    #[test]
    fn test_estimate_new_keeps_existing_file() {
        let file = temp_path("existing");
        let mut existing = Estimate::new("Estimator", "JOB-1", "Client");
        existing.add_room(Room::new("Lobby", RoomDimensions::new(12.0, 12.0, 12.0, 12.0, 2.0)));
        save_estimate(&existing, &file).unwrap();

        let action = EstimateAction::New {
            file: file.clone(),
            estimator: String::new(),
            job: "JOB-2".to_string(),
            client: String::new(),
        };
        let err = run_estimate(action, &LayoutConfig::default()).unwrap_err();
        assert_eq!(err.downcast_ref::<CalcError>().map(CalcError::error_code), Some("FILE_ERROR"));

        let loaded = load_estimate(&file).unwrap();
        assert_eq!(loaded.meta.job_id, "JOB-1");
        assert_eq!(loaded.room_count(), 1);

        let _ = std::fs::remove_file(&file);
    }

    #[test]
    fn test_rejected_room_is_an_error() {
        let cli = Cli::try_parse_from([
            "ceiling_cli", "room", "--length1", "12", "--length2", "12", "--width1", "0", "--width2", "12", "--linter",
            "2",
        ])
        .unwrap();
        let err = run(cli).unwrap_err();
        let calc_error = err.downcast_ref::<CalcError>().unwrap();
        assert!(matches!(calc_error, CalcError::InvalidInput { field, .. } if field == "width1"));
    }

    #[test]
    fn test_default_config_without_file() {
        assert_eq!(load_config(None).unwrap(), LayoutConfig::default());
    }
}
