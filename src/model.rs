// Core structs: MarketSnapshot, SentimentSummary, IntelligenceReport
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Serialize)]
pub struct MarketSnapshot {
    pub product_name: String,
    pub market: String,
    pub retailers: BTreeMap<String, RetailerOffer>,
    pub prices_by_retailer: BTreeMap<String, f64>,
    pub average_price: f64,
    pub competitors: Vec<CompetitorListing>,
    pub specifications: BTreeMap<String, serde_json::Value>,
    pub review_samples: Vec<String>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetailerOffer {
    pub price_cad: f64,
    pub in_stock: bool,
    pub platform_rating: f64,
    pub review_count: u32,
    pub shipping: String,
}

/// Competitor entry. Name and price are mandatory; anything else the data
/// source reports is kept in the flattened `extra` map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorListing {
    pub name: String,
    pub price_cad: f64,
    #[serde(default)]
    pub retailer: String,
    #[serde(default)]
    pub category: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallSentiment {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValuePositioning {
    Budget,
    MidRange,
    Premium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub overall_sentiment: OverallSentiment,
    pub sentiment_score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub value_positioning: ValuePositioning,
}

impl SentimentSummary {
    /// Range checks on top of what deserialization already enforces.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.sentiment_score) {
            return Err(format!(
                "sentiment_score {} outside [0.0, 1.0]",
                self.sentiment_score
            ));
        }
        if self.strengths.is_empty() {
            return Err("strengths must contain at least one entry".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingAnalysis {
    pub retailers: BTreeMap<String, RetailerOffer>,
    pub prices_by_retailer: BTreeMap<String, f64>,
    pub average_price: f64,
    pub price_range: PriceRange,
    pub price_positioning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitiveLandscape {
    pub main_competitors: Vec<CompetitorListing>,
    pub market_position: String,
    pub competitive_advantages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntelligenceReport {
    pub executive_summary: String,
    pub pricing_analysis: PricingAnalysis,
    pub competitive_landscape: CompetitiveLandscape,
    pub sentiment_analysis: SentimentSummary,
    pub strategic_recommendations: Vec<String>,
}

impl IntelligenceReport {
    pub fn validate(&self) -> Result<(), String> {
        if self.strategic_recommendations.is_empty() {
            return Err("strategic_recommendations must contain at least one entry".into());
        }
        self.sentiment_analysis.validate()
    }
}

/// Pipeline position, carried by stage errors and progress logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Fetching,
    AnalyzingSentiment,
    Synthesizing,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Fetching => "market data collection",
            PipelineStage::AnalyzingSentiment => "sentiment analysis",
            PipelineStage::Synthesizing => "report synthesis",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{stage}: text generation request failed: {cause}")]
    UpstreamService { stage: PipelineStage, cause: String },

    #[error("{stage}: no JSON object in model response: {raw}")]
    MalformedResponse { stage: PipelineStage, raw: String },

    #[error("{stage}: response does not match the expected shape: {detail}")]
    SchemaViolation { stage: PipelineStage, detail: String },

    #[error("market data unavailable: {0}")]
    DataUnavailable(String),
}
