//! HTTP surface: `GET /cotacao`.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::deadline::Deadline;
use crate::error::QuoteError;
use crate::quotes::QuoteService;

/// Body of a successful `GET /cotacao`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BidResponse {
    pub bid: String,
}

pub struct AppState {
    pub quotes: QuoteService,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn from_config(config: &Config) -> Arc<Self> {
        Arc::new(Self {
            quotes: QuoteService::from_config(config),
            request_timeout: config.request_timeout,
        })
    }
}

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/cotacao", get(get_cotacao))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

impl IntoResponse for QuoteError {
    fn into_response(self) -> Response {
        tracing::warn!("quote request failed: {}", self);
        (StatusCode::BAD_REQUEST, "erro").into_response()
    }
}

async fn get_cotacao(State(state): State<Arc<AppState>>) -> Result<Json<BidResponse>, QuoteError> {
    let deadline = Deadline::after(state.request_timeout);
    let fetched = state.quotes.fetch(&deadline).await?;

    if let Err(e) = &fetched.persisted {
        tracing::error!("failed to store {} quote: {}", state.quotes.pair(), e);
    }

    Ok(Json(BidResponse {
        bid: fetched.quote.bid,
    }))
}
