// Pipeline orchestrator: fixed three-stage sequence, no retries.
use crate::analyzer::SentimentAnalyzer;
use crate::model::{IntelligenceReport, PipelineError, PipelineStage};
use crate::provider::MarketDataProvider;
use crate::report::ReportSynthesizer;

use std::sync::Arc;
use tracing::info;

/// Sequences the three stages and logs each transition. Stage faults are
/// propagated unchanged; classification happens at the HTTP boundary.
pub struct Pipeline {
    provider: Arc<dyn MarketDataProvider>,
    analyzer: Arc<dyn SentimentAnalyzer>,
    synthesizer: Arc<dyn ReportSynthesizer>,
}

impl Pipeline {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        analyzer: Arc<dyn SentimentAnalyzer>,
        synthesizer: Arc<dyn ReportSynthesizer>,
    ) -> Self {
        Self {
            provider,
            analyzer,
            synthesizer,
        }
    }

    pub async fn run(
        &self,
        product_name: &str,
        market: &str,
    ) -> Result<IntelligenceReport, PipelineError> {
        info!("Starting analysis for '{product_name}' in {market}");

        info!(stage = %PipelineStage::Fetching, "Stage 1/3: collecting market data");
        let snapshot = self.provider.fetch_snapshot(product_name, market).await?;
        info!(
            "Market data complete. Retailers: {} | Competitors: {} | Reviews: {}",
            snapshot.prices_by_retailer.len(),
            snapshot.competitors.len(),
            snapshot.review_samples.len()
        );

        info!(stage = %PipelineStage::AnalyzingSentiment, "Stage 2/3: analyzing review sentiment");
        let sentiment = self
            .analyzer
            .extract_sentiment(product_name, market, &snapshot.review_samples)
            .await?;
        info!(
            "Sentiment complete. Overall: {:?} (score: {:.2})",
            sentiment.overall_sentiment, sentiment.sentiment_score
        );

        info!(stage = %PipelineStage::Synthesizing, "Stage 3/3: synthesizing strategic report");
        let report = self
            .synthesizer
            .synthesize(product_name, market, &snapshot, &sentiment)
            .await?;
        info!("Report synthesis complete");

        Ok(report)
    }
}
