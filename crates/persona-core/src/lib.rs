//! # Persona Core
//!
//! Market context and persona tooling for the trading-persona agent.
//!
//! ## Overview
//!
//! - **Symbol discovery** from the CoinGecko trending list, with a fixed
//!   fallback list when the source is unusable
//! - **Context providers** for social posts (X/Twitter), social volume
//!   (Santiment) and hot news (CryptoPanic)
//! - **Aggregator** that enriches the top trending symbols concurrently and
//!   degrades every failed provider call to its default context
//! - **Persona stubs**, trade-decision forwarding and the capability
//!   descriptor served to the agent registry
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | CoinGecko, X/Twitter, Santiment and CryptoPanic clients |
//! | [`aggregator`] | Settle-all per-symbol fan-out |
//! | [`assembler`] | Final payload and analysis errors |
//! | [`config`] | Environment-driven configuration |
//! | [`discovery`] | Trending-symbol source contract and fallback |
//! | [`domain`] | Request-scoped value types |
//! | [`error`] | Validation errors |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`market`] | Discovery, aggregation and assembly in one call |
//! | [`persona`] | Persona stubs |
//! | [`plugin`] | OpenAPI capability descriptor |
//! | [`provider`] | Provider contract and structured errors |
//! | [`runtime`] | Agent runtime client |
//! | [`services`] | Service wiring |
//! | [`source`] | Provider identifiers |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use persona_core::{AgentConfig, MarketContextBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AgentConfig::from_env()?;
//!     let services = MarketContextBuilder::new(&config).build();
//!
//!     let analysis = services.market.analyze().await?;
//!     for context in &analysis.symbols_data {
//!         println!("{}: {} posts", context.symbol, context.social.volume);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Security
//!
//! - Credentials come from the environment and are never logged
//! - Request URLs are logged without their query string
//! - All HTTP requests use TLS via rustls

pub mod adapters;
pub mod aggregator;
pub mod assembler;
pub mod config;
pub mod discovery;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod market;
pub mod persona;
pub mod plugin;
pub mod provider;
pub mod runtime;
pub mod services;
pub mod source;

#[cfg(test)]
mod testing;

// Adapter implementations
pub use adapters::{CryptopanicProvider, SantimentProvider, TrendingDiscovery, TwitterProvider};

// Aggregation
pub use aggregator::{Aggregator, MAX_ENRICHED_SYMBOLS};
pub use assembler::{assemble, AnalysisError};
pub use discovery::{fallback_symbols, DiscoveryFuture, SymbolDiscovery, FALLBACK_SYMBOLS};
pub use market::MarketContextService;

// Configuration and wiring
pub use config::{AgentConfig, ConfigError, ProviderCredentials};
pub use services::{AgentServices, MarketContextBuilder};

// Domain models
pub use domain::{
    MarketAnalysis, NewsContext, NewsItem, OnChainContext, SocialContext, SocialPost,
    SymbolContext, TrendingCoin, TrendingSymbol,
};

// Error types
pub use error::ValidationError;

// HTTP client types
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpFuture, HttpMethod, HttpRequest, HttpResponse,
    ReqwestHttpClient,
};

// Persona and runtime
pub use persona::Persona;
pub use runtime::{RuntimeClient, RuntimeError, RuntimeReply, TradeRequest};

// Provider contract
pub use provider::{
    ContextProvider, ProviderError, ProviderErrorKind, ProviderFuture, ProviderResult,
};

// Source identifiers
pub use source::ProviderId;
