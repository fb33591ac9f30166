//! Vassago Energy Prediction CLI
//!
//! Command-line front-end for the Vassago household energy predictor.
//!
//! ## Usage
//!
//! ```bash
//! # One prediction plus the day's trend
//! vassago predict --model house.vrf --inputs day.json
//!
//! # Override a couple of features on the command line
//! vassago predict --model house.vrf --inputs day.json --set hour=18 --set T_out=2.5
//!
//! # Hard-fail on values outside the training ranges, render a chart
//! vassago predict --model house.vrf --inputs day.json --check-ranges --chart trend.png
//!
//! # Machine-readable output
//! vassago predict --model house.vrf --inputs day.json --json
//!
//! # Inspect a model file, or the input schema it expects
//! vassago inspect --model house.vrf
//! vassago schema --markdown
//!
//! # Convert an exporter JSON model into the .vrf container
//! vassago import --json forest.json --output house.vrf
//! ```

mod chart;
mod config;
mod inputs;
mod render;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use vassago_core::{predict_energy, project_day, Error as CoreError};
use vassago_forest::ForestModel;

use crate::config::PredictConfig;
use crate::inputs::CliInputs;
use crate::render::RunOutput;

#[derive(Parser, Debug)]
#[command(name = "vassago")]
#[command(author = "Daemoniorum LLC")]
#[command(version)]
#[command(about = "Vassago household energy predictor", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Predict energy for one set of conditions, plus the day's trend
    Predict(PredictArgs),

    /// Print the feature schema the model expects
    Schema {
        /// Emit the table in its published markdown form
        #[arg(long)]
        markdown: bool,
    },

    /// Show metadata and shape of a model file
    Inspect {
        /// Path to a .vrf model file
        #[arg(short, long)]
        model: PathBuf,
    },

    /// Convert an exporter JSON model into the .vrf container
    Import {
        /// Path to the exporter JSON file
        #[arg(long)]
        json: PathBuf,

        /// Destination .vrf path
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct PredictArgs {
    /// Path to a .vrf model file
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// JSON object file of feature values
    #[arg(short, long)]
    inputs: Option<PathBuf>,

    /// Set one feature value; repeatable, overrides --inputs
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = inputs::parse_set)]
    set: Vec<(String, f64)>,

    /// Treat the documented training ranges as hard limits
    #[arg(long)]
    check_ranges: bool,

    /// Skip the 24-hour trend projection
    #[arg(long)]
    no_trend: bool,

    /// Write the trend as a PNG line chart
    #[arg(long, value_name = "PATH")]
    chart: Option<PathBuf>,

    /// Emit JSON instead of human output
    #[arg(long)]
    json: bool,

    /// JSON run-config file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Command::Predict(args) => run_predict(args),
        Command::Schema { markdown } => {
            if markdown {
                println!("{}", render::SCALE_NOTE);
                println!();
                print!("{}", render::schema_markdown());
            } else {
                print!("{}", render::schema_table());
            }
            Ok(())
        }
        Command::Inspect { model } => run_inspect(&model),
        Command::Import { json, output } => run_import(&json, &output),
    }
}

fn run_predict(args: PredictArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => PredictConfig::from_file(path)?,
        None => PredictConfig::default(),
    };
    let config = config.apply_flags(
        args.model,
        args.inputs,
        args.check_ranges,
        args.no_trend,
        args.chart,
        args.json,
    );

    let model_path = config
        .model
        .as_deref()
        .ok_or("no model file given; pass --model or set it in the config file")?;

    info!(
        model = %model_path.display(),
        trend = config.trend,
        check_ranges = config.check_ranges,
        "starting prediction run"
    );

    let model = ForestModel::load(model_path)?;

    let file_values = match &config.inputs {
        Some(path) => CliInputs::load_file(path)?,
        None => Default::default(),
    };
    let merged = CliInputs::new(file_values, &args.set)?;
    let vector = merged.collect()?;

    if config.check_ranges {
        if let Err(err) = vector.check_ranges() {
            if let CoreError::OutOfRange { ref violations } = err {
                for violation in violations {
                    eprintln!("  {violation}");
                }
            }
            return Err(err.into());
        }
    }

    let result = predict_energy(&model, &vector)?;

    // Print the single result before the sweep; a failed projection must
    // not retract a prediction that already succeeded.
    if !config.json {
        println!("{}", render::result_line(&result));
        if !result.is_degenerate() {
            println!();
            println!("{}", render::gauge_lines(result.energy_wh));
        }
    }

    // The chart needs the projection even when the text output skips it.
    let series = if config.trend || config.chart.is_some() {
        Some(project_day(&vector, &model)?)
    } else {
        None
    };

    if let (Some(path), Some(series)) = (&config.chart, &series) {
        chart::write_trend_chart(series, path)?;
    }

    let shown = series.as_ref().filter(|_| config.trend);

    if config.json {
        let output = RunOutput {
            energy_wh: result.energy_wh,
            log2_energy: result.log2_energy,
            trend: shown,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let Some(series) = shown {
        println!();
        print!("{}", render::trend_table(series));
    }
    Ok(())
}

fn run_inspect(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let model = ForestModel::load(path)?;
    let metadata = model.metadata();

    println!("Model:            {}", metadata.model_id);
    println!("File:             {}", path.display());
    println!("Features:         {}", metadata.feature_count);
    println!("Trees:            {}", model.tree_count());
    println!("Nodes:            {}", model.node_count());
    println!("Max depth:        {}", model.max_depth());
    println!("Created:          {} (unix)", metadata.created_at);
    println!("Exporter version: {}", metadata.exporter_version);
    Ok(())
}

fn run_import(json: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let model = ForestModel::load_json(json)?;
    model.save(output)?;
    println!(
        "Imported {} trees from {} into {}",
        model.tree_count(),
        json.display(),
        output.display()
    );
    Ok(())
}
