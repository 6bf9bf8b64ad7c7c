use crate::llm::json;
use crate::llm::{GenerationRequest, TextGenerator};
use crate::model::{PipelineError, PipelineStage, SentimentSummary};

use std::fmt::Write;
use std::sync::Arc;

const STAGE: PipelineStage = PipelineStage::AnalyzingSentiment;
const MAX_TOKENS: u32 = 1024;
// Low temperature keeps the structured output stable.
const TEMPERATURE: f32 = 0.1;

/// Trait defining the interface for the review sentiment stage.
#[async_trait::async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    async fn extract_sentiment(
        &self,
        product_name: &str,
        market: &str,
        reviews: &[String],
    ) -> Result<SentimentSummary, PipelineError>;
}

/// Sentiment extraction backed by the text-generation service.
pub struct LlmSentimentAnalyzer {
    llm: Arc<dyn TextGenerator>,
}

impl LlmSentimentAnalyzer {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self { llm }
    }

    fn build_prompt(product_name: &str, market: &str, reviews: &[String]) -> String {
        let mut reviews_text = String::new();
        for review in reviews {
            let _ = writeln!(reviews_text, "- {review}");
        }

        format!(
            "You are a sentiment analysis expert. Analyze the following customer reviews \
for {product_name} in the {market} market.\n\n\
Reviews:\n{reviews_text}\n\
Base your analysis only on the reviews above. Do not invent information that is not \
present in them.\n\n\
Respond with ONLY valid JSON in this exact format, no markdown, no explanation:\n\
{{\n\
    \"overall_sentiment\": \"positive|negative|neutral|mixed\",\n\
    \"sentiment_score\": <float between 0.0 and 1.0 where 1.0 is most positive>,\n\
    \"strengths\": [\"strength1\", \"strength2\"],\n\
    \"weaknesses\": [\"weakness1\", \"weakness2\"],\n\
    \"value_positioning\": \"budget|mid-range|premium\"\n\
}}"
        )
    }
}

#[async_trait::async_trait]
impl SentimentAnalyzer for LlmSentimentAnalyzer {
    async fn extract_sentiment(
        &self,
        product_name: &str,
        market: &str,
        reviews: &[String],
    ) -> Result<SentimentSummary, PipelineError> {
        let request = GenerationRequest {
            system: None,
            prompt: Self::build_prompt(product_name, market, reviews),
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

        let summary: SentimentSummary =
            serde_json::from_value(value).map_err(|e| PipelineError::SchemaViolation {
                stage: STAGE,
                detail: e.to_string(),
            })?;

        summary
            .validate()
            .map_err(|detail| PipelineError::SchemaViolation { stage: STAGE, detail })?;

        Ok(summary)
    }
}
