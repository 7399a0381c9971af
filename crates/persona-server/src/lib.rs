//! # Persona Server
//!
//! HTTP tool server for the trading-persona agent. Serves the capability
//! descriptor and the tool endpoints backed by `persona-core`.
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /api/ai-plugin` | OpenAPI capability descriptor |
//! | `GET /api/tools/create-trading-persona` | Echo a new persona |
//! | `GET /api/tools/get-persona` | Built-in demo persona |
//! | `GET /api/tools/trading-decision` | Placeholder decision |
//! | `GET /api/tools/trade` | Forward a trade decision to the agent runtime |
//! | `GET /api/tools/trending-coins` | CoinGecko trending list |
//! | `GET /api/tools/market-analysis` | Market context for the top trending symbols |
//! | `GET /health` | Liveness |

pub mod api;
pub mod cli;
pub mod error;
pub mod logging;

use persona_core::AgentConfig;
use tokio::net::TcpListener;

use crate::api::AppState;
use crate::cli::Cli;
use crate::error::ServerError;

/// Reads configuration, binds the listener and serves until shutdown.
pub async fn run(cli: &Cli) -> Result<(), ServerError> {
    let config = AgentConfig::from_env()?;

    let configured: Vec<&str> = config
        .credentials
        .configured()
        .into_iter()
        .map(|provider| provider.as_str())
        .collect();
    tracing::info!(
        providers = ?configured,
        timeout_ms = config.request_timeout_ms,
        "provider credentials loaded"
    );

    let app = api::router(AppState::from_config(config));

    let listener = TcpListener::bind(cli.listen)
        .await
        .map_err(|source| ServerError::Bind {
            addr: cli.listen,
            source,
        })?;
    tracing::info!(addr = %cli.listen, "persona agent listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
