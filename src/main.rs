mod analyzer;
mod api;
mod config;
mod llm;
mod model;
mod pipeline;
mod provider;
mod report;
#[cfg(test)]
mod testutil;

use analyzer::LlmSentimentAnalyzer;
use api::AppState;
use config::AppConfig;
use llm::{AnthropicClient, TextGenerator};
use pipeline::Pipeline;
use provider::SimulatedMarketData;
use report::LlmReportSynthesizer;

use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {e}");
            return;
        }
    };
    info!("Using model: {}", config.model);

    let llm: Arc<dyn TextGenerator> = Arc::new(AnthropicClient::new(&config));
    let pipeline = Arc::new(Pipeline::new(
        Arc::new(SimulatedMarketData::new()),
        Arc::new(LlmSentimentAnalyzer::new(llm.clone())),
        Arc::new(LlmReportSynthesizer::new(llm)),
    ));

    let state = AppState {
        pipeline,
        supported_market: config.supported_market.clone(),
    };
    let app = api::router(state);

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {e}", config.bind_addr);
            return;
        }
    };
    info!("market-scout listening on {}", config.bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {e}");
    }
}
