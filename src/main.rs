//! CLI entry point for the AQI insight tool.
//!
//! Provides subcommands for predicting a city's AQI for a future month,
//! summarizing the measurement history, and inspecting the loaded tables.

use anyhow::Result;
use aqi_insight::{
    config::AppConfig,
    confidence::{confidence_label, confidence_level},
    fetch::{BasicClient, auth::ApiKey},
    lookup::{CityMapping, HistoricalFeatureTable, LookupTables},
    model::{AqiModel, LinearModel, RemoteModel},
    output::{append_record, print_json},
    predict::{PredictionRequest, PredictionResult, Predictor},
    stats::stats_from_path,
};
use chrono::Local;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "aqi_insight")]
#[command(about = "Predict and summarize city air quality", long_about = None)]
struct Cli {
    /// City mapping JSON (overrides AQI_CITY_MAPPING)
    #[arg(long, global = true)]
    city_mapping: Option<String>,

    /// Historical features CSV (overrides AQI_HISTORICAL_FEATURES)
    #[arg(long, global = true)]
    history: Option<String>,

    /// Measurement dataset CSV, optionally gzipped (overrides AQI_DATASET)
    #[arg(long, global = true)]
    dataset: Option<String>,

    /// Linear model artifact (overrides AQI_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Remote model endpoint (overrides AQI_MODEL_URL)
    #[arg(long, global = true)]
    model_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the AQI for a city in a given month
    Predict {
        #[arg(short, long)]
        city: String,

        #[arg(short, long, allow_negative_numbers = true)]
        year: i32,

        #[arg(short, long, allow_negative_numbers = true)]
        month: i32,

        /// Optional: CSV file to append the prediction to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Summarize the full measurement history
    Stats,
    /// List the cities the model knows about
    Cities,
    /// Load every table and report their sizes
    Health,
}

/// Prediction plus how far to trust it given the forecast horizon.
#[derive(Serialize)]
struct PredictionReport<'a> {
    #[serde(flatten)]
    prediction: &'a PredictionResult,
    confidence: u8,
    confidence_label: &'static str,
}

#[derive(Serialize)]
struct HealthReport {
    status: &'static str,
    cities: usize,
    historical_records: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();
    let mut config = AppConfig::from_env()?;
    apply_overrides(&mut config, &cli);

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = Path::new(&config.log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&config.log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("aqi_insight.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    match cli.command {
        Commands::Predict {
            city,
            year,
            month,
            output,
        } => {
            let tables = Arc::new(load_tables(&config)?);
            let model = load_model(&config)?;
            let predictor = Predictor::new(tables, model).with_year_bounds(config.year_bounds);

            let request = PredictionRequest { city, year, month };
            let result = match predictor.predict(&request).await {
                Ok(result) => result,
                Err(e) => {
                    error!(status = e.status_code(), error = %e, "Prediction failed");
                    anyhow::bail!("{} (status {})", e.public_message(), e.status_code());
                }
            };

            let confidence = confidence_level(result.year, result.month, Local::now().date_naive());
            print_json(&PredictionReport {
                prediction: &result,
                confidence,
                confidence_label: confidence_label(confidence),
            })?;

            if let Some(path) = output {
                append_record(&path, &result)?;
                info!(path = %path, "Prediction appended");
            }
        }
        Commands::Stats => match stats_from_path(&config.dataset_path) {
            Ok(stats) => print_json(&stats)?,
            Err(e) => {
                error!(status = e.status_code(), error = %e, "Stats failed");
                anyhow::bail!("{} (status {})", e.public_message(), e.status_code());
            }
        },
        Commands::Cities => {
            let cities = CityMapping::load(&config.city_mapping_path)?;
            info!(total = cities.len(), "Available cities");
            print_json(&cities.sorted_names())?;
        }
        Commands::Health => {
            let tables = load_tables(&config)?;
            print_json(&HealthReport {
                status: "healthy",
                cities: tables.cities.len(),
                historical_records: tables.history.len(),
            })?;
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(path) = &cli.city_mapping {
        config.city_mapping_path = path.clone();
    }
    if let Some(path) = &cli.history {
        config.historical_features_path = path.clone();
    }
    if let Some(path) = &cli.dataset {
        config.dataset_path = path.clone();
    }
    if let Some(path) = &cli.model {
        config.model_path = path.clone();
    }
    if let Some(url) = &cli.model_url {
        config.model_url = Some(url.clone());
    }
}

/// Loads both lookup tables once; they are shared read-only afterwards.
fn load_tables(config: &AppConfig) -> Result<LookupTables> {
    let cities = CityMapping::load(&config.city_mapping_path)?;
    let history = HistoricalFeatureTable::load(&config.historical_features_path)?;
    Ok(LookupTables::new(cities, history))
}

/// Picks the remote model when an endpoint is configured, else the local artifact.
fn load_model(config: &AppConfig) -> Result<Box<dyn AqiModel>> {
    let Some(url) = &config.model_url else {
        return Ok(Box::new(LinearModel::load(&config.model_path)?));
    };

    let client = BasicClient::with_timeout(Duration::from_secs(30))?;
    info!(url = %url, "Using remote model");

    let model: Box<dyn AqiModel> = match &config.model_token {
        Some(token) => Box::new(RemoteModel::new(ApiKey::bearer(client, token)?, url.clone())),
        None => Box::new(RemoteModel::new(client, url.clone())),
    };
    Ok(model)
}
