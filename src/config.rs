use crate::model::{AnalysisError, Result};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub children_file: String,
    pub total_births_file: String,
    pub currency_file: String,
    pub forecast_years: usize,
    pub forecast_days: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            children_file: "data/childrenData.json".to_string(),
            total_births_file: "data/totalBirthsData.json".to_string(),
            currency_file: "data/exchangeRates.json".to_string(),
            forecast_years: 5,
            forecast_days: 10,
        }
    }
}

/// Loads the config file; a missing file yields the defaults.
pub fn load_config(path: &str) -> Result<AppConfig> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Config {} not found, using defaults", path);
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(AnalysisError::Io {
                path: path.to_string(),
                source,
            });
        }
    };
    serde_json::from_str(&content).map_err(|e| AnalysisError::Config(format!("{}: {}", path, e)))
}
