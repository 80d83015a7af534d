// Core structs: analysis results and the crate error type
use serde::Serialize;
use thiserror::Error;

/// One row of the births `data` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearPercentage {
    pub year: i64,
    pub percentage_out_of_wedlock: f64,
}

/// Row at which the year-over-year change peaks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearExtreme {
    pub value: f64,
    pub year: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearForecast {
    pub year: i64,
    pub predicted_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthsResult {
    pub data: Vec<YearPercentage>,
    pub max_change: YearExtreme,
    pub min_change: YearExtreme,
    pub forecast: Vec<YearForecast>,
}

/// One row of the currency `daily_rates` block, date as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRate {
    pub date: String,
    pub usd: f64,
    pub eur: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateExtreme {
    pub value: f64,
    pub date: String,
}

/// `max_gain` is the largest one-day drop, `max_loss` the largest one-day rise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyExtremes {
    pub max_gain: DateExtreme,
    pub max_loss: DateExtreme,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateForecast {
    pub date: String,
    pub predicted_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyForecast {
    pub usd: Vec<DateForecast>,
    pub eur: Vec<DateForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyResult {
    pub daily_rates: Vec<DailyRate>,
    pub usd: CurrencyExtremes,
    pub eur: CurrencyExtremes,
    pub forecast: CurrencyForecast,
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Out-of-range forecasting parameter.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// Missing or malformed input data.
    #[error("Data error in {source_name}: {reason}")]
    Data { source_name: String, reason: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),
}

impl AnalysisError {
    pub fn data(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalysisError::Data {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
