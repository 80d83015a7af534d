use crate::model::Result;
use crate::table::Table;

#[async_trait::async_trait]
pub trait TableSource: Send + Sync {
    async fn load(&self, location: &str) -> Result<Table>;
}
