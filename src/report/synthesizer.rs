use crate::llm::json;
use crate::llm::{GenerationRequest, TextGenerator};
use crate::model::{IntelligenceReport, MarketSnapshot, PipelineError, PipelineStage, SentimentSummary};

use serde::Serialize;
use std::sync::Arc;

const STAGE: PipelineStage = PipelineStage::Synthesizing;
const MAX_TOKENS: u32 = 2048;
const TEMPERATURE: f32 = 0.2;

/// Trait defining the interface for the report synthesis stage.
#[async_trait::async_trait]
pub trait ReportSynthesizer: Send + Sync {
    async fn synthesize(
        &self,
        product_name: &str,
        market: &str,
        snapshot: &MarketSnapshot,
        sentiment: &SentimentSummary,
    ) -> Result<IntelligenceReport, PipelineError>;
}

/// Report synthesis backed by the text-generation service. The prompt embeds
/// the upstream data verbatim and pre-fills the factual report fields so the
/// model only writes the narrative parts around them.
pub struct LlmReportSynthesizer {
    llm: Arc<dyn TextGenerator>,
}

fn to_json(value: &impl Serialize) -> String {
    serde_json::to_string(value).expect("serializable")
}

fn to_json_pretty(value: &impl Serialize) -> String {
    serde_json::to_string_pretty(value).expect("serializable")
}

impl LlmReportSynthesizer {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self { llm }
    }

    fn build_system_prompt(market: &str) -> String {
        format!(
            "You are a Market Intelligence Analyst specializing in the {market} market. \
Base your analysis strictly on the data provided. \
Do not invent prices, competitors, or market information not present in the input."
        )
    }

    fn build_user_prompt(
        product_name: &str,
        market: &str,
        snapshot: &MarketSnapshot,
        sentiment: &SentimentSummary,
    ) -> String {
        let pricing = serde_json::json!({
            "prices_by_retailer": snapshot.prices_by_retailer,
            "average_price": snapshot.average_price,
        });

        format!(
            "Generate a comprehensive market intelligence report based on the following data.\n\n\
Product: {product_name}\n\
Market: {market}\n\n\
Pricing Data:\n{pricing}\n\n\
Competitor Landscape:\n{competitors}\n\n\
Product Specifications:\n{specifications}\n\n\
Sentiment Analysis Results:\n{sentiment_block}\n\n\
Respond with ONLY valid JSON in this exact format, no markdown, no explanation:\n\
{{\n\
    \"executive_summary\": \"<2-3 sentence strategic summary of the product position in the {market} market>\",\n\
    \"pricing_analysis\": {{\n\
        \"retailers\": {retailers},\n\
        \"prices_by_retailer\": {prices},\n\
        \"average_price\": {average_price},\n\
        \"price_range\": {{\"min\": <float>, \"max\": <float>}},\n\
        \"price_positioning\": \"<narrative about how the product is priced relative to competitors in {market}>\"\n\
    }},\n\
    \"competitive_landscape\": {{\n\
        \"main_competitors\": {competitors_inline},\n\
        \"market_position\": \"<description of where the product sits in the {market} competitive landscape>\",\n\
        \"competitive_advantages\": [\"advantage1\", \"advantage2\", \"advantage3\"]\n\
    }},\n\
    \"sentiment_analysis\": {{\n\
        \"overall_sentiment\": {overall_sentiment},\n\
        \"sentiment_score\": {sentiment_score},\n\
        \"strengths\": {strengths},\n\
        \"weaknesses\": {weaknesses},\n\
        \"value_positioning\": {value_positioning}\n\
    }},\n\
    \"strategic_recommendations\": [\"recommendation1\", \"recommendation2\", \"recommendation3\", \"recommendation4\"]\n\
}}",
            pricing = to_json_pretty(&pricing),
            competitors = to_json_pretty(&snapshot.competitors),
            specifications = to_json_pretty(&snapshot.specifications),
            sentiment_block = to_json_pretty(sentiment),
            retailers = to_json(&snapshot.retailers),
            prices = to_json(&snapshot.prices_by_retailer),
            average_price = snapshot.average_price,
            competitors_inline = to_json(&snapshot.competitors),
            overall_sentiment = to_json(&sentiment.overall_sentiment),
            sentiment_score = sentiment.sentiment_score,
            strengths = to_json(&sentiment.strengths),
            weaknesses = to_json(&sentiment.weaknesses),
            value_positioning = to_json(&sentiment.value_positioning),
        )
    }
}

#[async_trait::async_trait]
impl ReportSynthesizer for LlmReportSynthesizer {
    async fn synthesize(
        &self,
        product_name: &str,
        market: &str,
        snapshot: &MarketSnapshot,
        sentiment: &SentimentSummary,
    ) -> Result<IntelligenceReport, PipelineError> {
        let request = GenerationRequest {
            system: Some(Self::build_system_prompt(market)),
            prompt: Self::build_user_prompt(product_name, market, snapshot, sentiment),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let raw = self
            .llm
            .generate(request)
            .await
            .map_err(|e| PipelineError::UpstreamService {
                stage: STAGE,
                cause: e.to_string(),
            })?;

        let value = json::parse_object(&raw).ok_or_else(|| PipelineError::MalformedResponse {
            stage: STAGE,
            raw: raw.clone(),
        })?;

        let report: IntelligenceReport =
            serde_json::from_value(value).map_err(|e| PipelineError::SchemaViolation {
                stage: STAGE,
                detail: e.to_string(),
            })?;

        report
            .validate()
            .map_err(|detail| PipelineError::SchemaViolation { stage: STAGE, detail })?;

        Ok(report)
    }
}
