// Analyzer module: review sentiment extraction (second pipeline stage).

pub mod sentiment;

pub use sentiment::{LlmSentimentAnalyzer, SentimentAnalyzer};
