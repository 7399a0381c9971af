mod error;
mod handlers;
mod state;

pub use error::ApiError;
pub use state::AppState;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/ai-plugin", get(handlers::ai_plugin))
        .route(
            "/api/tools/create-trading-persona",
            get(handlers::create_trading_persona),
        )
        .route("/api/tools/get-persona", get(handlers::get_persona))
        .route("/api/tools/trading-decision", get(handlers::trading_decision))
        .route("/api/tools/trade", get(handlers::trade))
        .route("/api/tools/trending-coins", get(handlers::trending_coins))
        .route("/api/tools/market-analysis", get(handlers::market_analysis))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        // The descriptor and tools are called cross-origin by the agent registry.
        .layer(CorsLayer::permissive())
        .with_state(state)
}
