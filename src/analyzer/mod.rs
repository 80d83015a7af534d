// Analyzer module: the forecaster, shared series helpers and the two dataset pipelines.

pub mod births;
pub mod currency;
pub mod forecast;
pub mod series;

// Re-export the pipelines for ease of use.
pub use births::BirthsAnalyzer;
pub use currency::CurrencyAnalyzer;
