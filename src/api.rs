// HTTP boundary: request validation and fault-to-status mapping.
use crate::model::{IntelligenceReport, PipelineError};
use crate::pipeline::Pipeline;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

/// What a caller sees on any pipeline fault. The cause goes to the log only.
const PIPELINE_FAILURE_DETAIL: &str = "Analysis pipeline failed. Check server logs for details.";

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub supported_market: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    product_name: Option<String>,
    market: Option<String>,
}

enum ApiError {
    Validation(String),
    Pipeline(PipelineError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"detail": detail})),
            )
                .into_response(),
            ApiError::Pipeline(err) => {
                error!("Analysis pipeline failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": PIPELINE_FAILURE_DETAIL})),
                )
                    .into_response()
            }
        }
    }
}

async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<IntelligenceReport>, ApiError> {
    let product_name = request
        .product_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::Validation("product_name is required and must be non-empty".into()))?
        .to_string();

    let market = request
        .market
        .ok_or_else(|| ApiError::Validation("market is required".into()))?;

    if market != state.supported_market {
        return Err(ApiError::Validation(format!(
            "market '{market}' is not supported; this service only covers '{}'",
            state.supported_market
        )));
    }

    let report = state
        .pipeline
        .run(&product_name, &market)
        .await
        .map_err(ApiError::Pipeline)?;

    Ok(Json(report))
}
