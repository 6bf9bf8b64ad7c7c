use crate::model::{MarketSnapshot, PipelineError};

#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_snapshot(
        &self,
        product_name: &str,
        market: &str,
    ) -> Result<MarketSnapshot, PipelineError>;
}
