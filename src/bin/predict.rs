//! Pricecast headless predictor
//!
//! Loads the model artifact once and serves either a single prediction from
//! flags or one independent prediction per row of a CSV file.
//!
//! # Usage
//! ```sh
//! cargo run --bin predict -- --spx 4100 --gld 182.5
//! cargo run --bin predict -- --batch data/indicators.csv
//! ```
//!
//! # Environment Variables
//! - `PRICECAST_MODEL_PATH` - Model artifact (default: trained_model.sav)
//! - `PRICECAST_MODEL_SHA256` - Expected artifact digest (optional)
//! - `LOG_LEVEL` / `LOG_FORMAT` - Logging (default: info / pretty)

use anyhow::{Context, Result};
use clap::Parser;
use pricecast::application::batch::{self, EXIT_STARTUP_FAILURE};
use pricecast::application::ml::inference_service::InferenceService;
use pricecast::application::ml::model_loader::ModelLoader;
use pricecast::application::prediction_form::{StartupBanner, evaluate};
use pricecast::config::{Config, parse_sha256};
use pricecast::domain::ml::feature_registry::{FEATURE_BOUNDS, FeatureVector};
use pricecast::infrastructure::telemetry;
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, allow_negative_numbers = true)]
struct Args {
    /// Path to the model artifact (overrides PRICECAST_MODEL_PATH)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Expected SHA-256 of the artifact (overrides PRICECAST_MODEL_SHA256)
    #[arg(long)]
    sha256: Option<String>,

    /// S&P 500 index level
    #[arg(long, default_value_t = FEATURE_BOUNDS[0].default)]
    spx: f64,

    /// Gold ETF price
    #[arg(long, default_value_t = FEATURE_BOUNDS[1].default)]
    gld: f64,

    /// Oil ETF price
    #[arg(long, default_value_t = FEATURE_BOUNDS[2].default)]
    uso: f64,

    /// Silver ETF price
    #[arg(long, default_value_t = FEATURE_BOUNDS[3].default)]
    slv: f64,

    /// CSV file with a SPX,GLD,USO,SLV header; one prediction per row
    #[arg(long)]
    batch: Option<PathBuf>,

    /// Skip the input range checks (the model's own checks still apply)
    #[arg(long)]
    allow_out_of_range: bool,
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(model) = args.model.clone() {
        config.model.model_path = model;
    }
    if let Some(digest) = &args.sha256 {
        config.model.model_sha256 = Some(parse_sha256(digest)?);
    }

    if let Err(e) = telemetry::init(&config.logging, None) {
        eprintln!("Failed to initialize logging: {}", e);
    }
    info!("Pricecast predictor {} starting...", env!("CARGO_PKG_VERSION"));

    let loader = ModelLoader::from_config(&config.model);
    let service = match InferenceService::start(&config.model.model_path, &loader) {
        Ok(service) => service,
        Err(e) => {
            let banner = StartupBanner::failed(&e);
            eprintln!("{}", banner.headline);
            if let Some(hint) = banner.hint {
                eprintln!("{}", hint);
            }
            return Ok(ExitCode::from(EXIT_STARTUP_FAILURE));
        }
    };
    println!("{}", StartupBanner::ready(service.model_info()).headline);

    let enforce_ranges = !args.allow_out_of_range;
    let status = match &args.batch {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open batch file {}", path.display()))?;
            let report = batch::run_batch(&service, file, enforce_ranges);
            for row in &report.rows {
                for line in row.lines() {
                    if row.is_success() {
                        println!("{}", line);
                    } else {
                        eprintln!("{}", line);
                    }
                }
            }
            report.exit_status()
        }
        None => {
            let features = FeatureVector::new(args.spx, args.gld, args.uso, args.slv);
            let outcome = evaluate(&service, &features, enforce_ranges);
            if outcome.is_success() {
                println!("{}", outcome.headline());
            } else {
                eprintln!("{}", outcome.headline());
                if let Some(hint) = outcome.hint() {
                    eprintln!("{}", hint);
                }
            }
            batch::exit_status(usize::from(!outcome.is_success()))
        }
    };

    Ok(ExitCode::from(status))
}
