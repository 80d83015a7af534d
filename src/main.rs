mod analyzer;
mod config;
mod model;
mod source;
mod table;
mod utils;

use analyzer::{BirthsAnalyzer, CurrencyAnalyzer};
use config::{load_config, AppConfig};
use model::Result;
use source::{JsonFileSource, TableSource};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&config, &JsonFileSource::new()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Analysis failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Loads the three tables, runs both analyses and prints the results.
async fn run(config: &AppConfig, source: &dyn TableSource) -> Result<()> {
    info!("Loading input tables...");
    let (children, totals, rates) = futures::try_join!(
        source.load(&config.children_file),
        source.load(&config.total_births_file),
        source.load(&config.currency_file),
    )?;

    info!("Analyzing births, forecasting {} years...", config.forecast_years);
    let births = BirthsAnalyzer::new().analyze(&children, &totals, config.forecast_years)?;

    info!("Analyzing exchange rates, forecasting {} days...", config.forecast_days);
    let currency = CurrencyAnalyzer::new().analyze(&rates, config.forecast_days)?;

    println!("\n=== Births Result ===");
    println!("{}", to_pretty_json(&births)?);
    println!("\n=== Currency Result ===");
    println!("{}", to_pretty_json(&currency)?);
    Ok(())
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| model::AnalysisError::data("output", e.to_string()))
}
