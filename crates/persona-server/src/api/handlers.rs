use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use persona_core::{plugin, MarketAnalysis, Persona, TradeRequest, TrendingCoin};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::error::ApiError;
use super::state::AppState;

/// GET /api/ai-plugin - capability descriptor
pub async fn ai_plugin(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(plugin::descriptor(&state.config))
}

#[derive(Debug, Deserialize)]
pub struct CreatePersonaQuery {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// GET /api/tools/create-trading-persona
pub async fn create_trading_persona(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CreatePersonaQuery>,
) -> Result<Json<Persona>, ApiError> {
    let persona = Persona::create(
        query.name.as_deref(),
        query.description.as_deref(),
        &state.config.user_address,
    )?;

    tracing::info!(name = %persona.name, "trading persona created");
    Ok(Json(persona))
}

/// GET /api/tools/get-persona
pub async fn get_persona(State(state): State<Arc<AppState>>) -> Json<Persona> {
    Json(Persona::captain_crypto(&state.config.user_address))
}

/// GET /api/tools/trading-decision - placeholder
pub async fn trading_decision() -> Json<Value> {
    Json(json!({ "message": "test" }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeQuery {
    pub description: Option<String>,
    pub persona_address: Option<String>,
    pub trending_coins: Option<String>,
}

/// GET /api/tools/trade - relays the agent runtime's answer
pub async fn trade(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TradeQuery>,
) -> Result<Response, ApiError> {
    let request = TradeRequest::new(
        query.description.as_deref(),
        query.persona_address.as_deref(),
        query.trending_coins.as_deref(),
    )?;

    let reply = state.services.runtime.forward(&request).await?;
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);

    Ok((status, Json(reply.body)).into_response())
}

#[derive(Debug, Serialize)]
pub struct TrendingCoinsResponse {
    pub trending_coins: Vec<TrendingCoin>,
}

/// GET /api/tools/trending-coins
pub async fn trending_coins(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TrendingCoinsResponse>, ApiError> {
    let trending_coins = state.services.trending.trending_coins().await.map_err(|error| {
        ApiError::Internal(format!(
            "Failed to fetch trending coins data: {}",
            error.message()
        ))
    })?;

    Ok(Json(TrendingCoinsResponse { trending_coins }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysisResponse {
    pub market_analysis: MarketAnalysis,
}

/// GET /api/tools/market-analysis
pub async fn market_analysis(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MarketAnalysisResponse>, ApiError> {
    let market_analysis = state.services.market.analyze().await?;
    Ok(Json(MarketAnalysisResponse { market_analysis }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health - Health check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
