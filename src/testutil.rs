// Fixtures and scripted fakes shared by the module tests. Test-only.

use crate::analyzer::SentimentAnalyzer;
use crate::llm::{GenerationError, GenerationRequest, TextGenerator};
use crate::model::{
    CompetitiveLandscape, CompetitorListing, IntelligenceReport, MarketSnapshot, OverallSentiment,
    PipelineError, PipelineStage, PriceRange, PricingAnalysis, RetailerOffer, SentimentSummary,
    ValuePositioning,
};
use crate::provider::MarketDataProvider;
use crate::report::ReportSynthesizer;

use chrono::Utc;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

pub type CallLog = Arc<Mutex<Vec<&'static str>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

// --- scripted text generator ---

enum Reply {
    Text(String),
    Fail(String),
}

/// TextGenerator fake that replays queued replies and records every request
/// for assertions.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Reply>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl ScriptedGenerator {
    fn with(reply: Reply) -> Self {
        let mut replies = VecDeque::new();
        replies.push_back(reply);
        Self {
            replies: Mutex::new(replies),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::with(Reply::Text(text.to_string()))
    }

    pub fn failing(cause: &str) -> Self {
        Self::with(Reply::Fail(cause.to_string()))
    }

    pub fn then_replying(self, text: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Text(text.to_string()));
        self
    }

    /// Shared handle to the recorded requests; valid after `self` moves into
    /// the component under test.
    pub fn requests(&self) -> Arc<Mutex<Vec<GenerationRequest>>> {
        self.requests.clone()
    }
}

#[async_trait::async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request);
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Fail(cause)) => Err(GenerationError::Transport(cause)),
            None => Err(GenerationError::Transport("no scripted reply left".into())),
        }
    }
}

// --- recording stage fakes ---

pub struct RecordingProvider {
    log: CallLog,
    snapshot: MarketSnapshot,
}

impl RecordingProvider {
    pub fn new(log: CallLog, snapshot: MarketSnapshot) -> Self {
        Self { log, snapshot }
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for RecordingProvider {
    async fn fetch_snapshot(
        &self,
        _product_name: &str,
        _market: &str,
    ) -> Result<MarketSnapshot, PipelineError> {
        self.log.lock().unwrap().push("provider");
        Ok(self.snapshot.clone())
    }
}

pub struct FailingProvider;

#[async_trait::async_trait]
impl MarketDataProvider for FailingProvider {
    async fn fetch_snapshot(
        &self,
        _product_name: &str,
        _market: &str,
    ) -> Result<MarketSnapshot, PipelineError> {
        Err(PipelineError::DataUnavailable("simulated outage".into()))
    }
}

pub struct RecordingAnalyzer {
    log: CallLog,
    summary: SentimentSummary,
    pub seen_reviews: Mutex<Vec<String>>,
}

impl RecordingAnalyzer {
    pub fn new(log: CallLog, summary: SentimentSummary) -> Self {
        Self {
            log,
            summary,
            seen_reviews: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl SentimentAnalyzer for RecordingAnalyzer {
    async fn extract_sentiment(
        &self,
        _product_name: &str,
        _market: &str,
        reviews: &[String],
    ) -> Result<SentimentSummary, PipelineError> {
        self.log.lock().unwrap().push("analyzer");
        *self.seen_reviews.lock().unwrap() = reviews.to_vec();
        Ok(self.summary.clone())
    }
}

pub struct FailingAnalyzer;

#[async_trait::async_trait]
impl SentimentAnalyzer for FailingAnalyzer {
    async fn extract_sentiment(
        &self,
        _product_name: &str,
        _market: &str,
        _reviews: &[String],
    ) -> Result<SentimentSummary, PipelineError> {
        Err(PipelineError::MalformedResponse {
            stage: PipelineStage::AnalyzingSentiment,
            raw: "no JSON here".into(),
        })
    }
}

pub struct RecordingSynthesizer {
    log: CallLog,
    report: IntelligenceReport,
    pub seen_sentiment: Mutex<Option<SentimentSummary>>,
}

impl RecordingSynthesizer {
    pub fn new(log: CallLog, report: IntelligenceReport) -> Self {
        Self {
            log,
            report,
            seen_sentiment: Mutex::new(None),
        }
    }
}

#[async_trait::async_trait]
impl ReportSynthesizer for RecordingSynthesizer {
    async fn synthesize(
        &self,
        _product_name: &str,
        _market: &str,
        _snapshot: &MarketSnapshot,
        sentiment: &SentimentSummary,
    ) -> Result<IntelligenceReport, PipelineError> {
        self.log.lock().unwrap().push("synthesizer");
        *self.seen_sentiment.lock().unwrap() = Some(sentiment.clone());
        Ok(self.report.clone())
    }
}

// --- fixtures ---

fn offer(price_cad: f64, platform_rating: f64, review_count: u32, shipping: &str) -> RetailerOffer {
    RetailerOffer {
        price_cad,
        in_stock: true,
        platform_rating,
        review_count,
        shipping: shipping.to_string(),
    }
}

pub fn sample_snapshot() -> MarketSnapshot {
    let mut retailers = BTreeMap::new();
    retailers.insert(
        "Amazon.ca".to_string(),
        offer(449.99, 4.3, 1842, "Free with Prime"),
    );
    retailers.insert(
        "BestBuy.ca".to_string(),
        offer(459.99, 4.1, 967, "Free over $35"),
    );

    let mut prices_by_retailer = BTreeMap::new();
    prices_by_retailer.insert("Amazon.ca".to_string(), 449.99);
    prices_by_retailer.insert("BestBuy.ca".to_string(), 459.99);

    let mut specifications = BTreeMap::new();
    specifications.insert("battery_life".to_string(), serde_json::json!("4-7 days"));
    specifications.insert(
        "sensors".to_string(),
        serde_json::json!(["heart rate", "SpO2"]),
    );

    MarketSnapshot {
        product_name: "Oura Ring Gen 3".to_string(),
        market: "Canada".to_string(),
        retailers,
        prices_by_retailer,
        average_price: 454.99,
        competitors: vec![CompetitorListing {
            name: "Samsung Galaxy Ring".to_string(),
            price_cad: 549.99,
            retailer: "BestBuy.ca".to_string(),
            category: "fitness ring".to_string(),
            extra: serde_json::Map::new(),
        }],
        specifications,
        review_samples: vec![
            "Great product".to_string(),
            "Worth the price".to_string(),
        ],
        fetched_at: Utc::now(),
    }
}

pub fn sample_sentiment() -> SentimentSummary {
    SentimentSummary {
        overall_sentiment: OverallSentiment::Positive,
        sentiment_score: 0.78,
        strengths: vec!["sleep tracking".to_string(), "battery life".to_string()],
        weaknesses: vec!["subscription cost".to_string()],
        value_positioning: ValuePositioning::Premium,
    }
}

pub fn sample_sentiment_json() -> String {
    serde_json::to_string(&sample_sentiment()).unwrap()
}

pub fn sample_report() -> IntelligenceReport {
    let snapshot = sample_snapshot();
    IntelligenceReport {
        executive_summary:
            "The Oura Ring Gen 3 holds a strong premium position in the Canadian market."
                .to_string(),
        pricing_analysis: PricingAnalysis {
            retailers: snapshot.retailers,
            prices_by_retailer: snapshot.prices_by_retailer,
            average_price: snapshot.average_price,
            price_range: PriceRange {
                min: 449.99,
                max: 459.99,
            },
            price_positioning: "Premium pricing consistent with brand positioning.".to_string(),
        },
        competitive_landscape: CompetitiveLandscape {
            main_competitors: snapshot.competitors,
            market_position: "Market leader in the premium fitness ring segment.".to_string(),
            competitive_advantages: vec![
                "Superior sleep tracking".to_string(),
                "Titanium build".to_string(),
            ],
        },
        sentiment_analysis: sample_sentiment(),
        strategic_recommendations: vec![
            "Introduce a loyalty program for Canadian customers".to_string(),
            "Expand retail presence".to_string(),
        ],
    }
}

pub fn sample_report_json() -> String {
    serde_json::to_string(&sample_report()).unwrap()
}
