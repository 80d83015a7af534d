use crate::model::{AnalysisError, Result};
use crate::source::traits::TableSource;
use crate::table::Table;
use tracing::info;

/// Reads JSON-array-of-records files from disk.
pub struct JsonFileSource;

impl JsonFileSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl TableSource for JsonFileSource {
    async fn load(&self, location: &str) -> Result<Table> {
        let text = tokio::fs::read_to_string(location)
            .await
            .map_err(|source| AnalysisError::Io {
                path: location.to_string(),
                source,
            })?;
        let table = Table::from_json(location, &text)?;
        info!("Loaded {} rows from {}", table.len(), location);
        Ok(table)
    }
}
