use std::sync::Arc;

use crate::adapters::{CryptopanicProvider, SantimentProvider, TrendingDiscovery, TwitterProvider};
use crate::aggregator::Aggregator;
use crate::config::AgentConfig;
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::market::MarketContextService;
use crate::runtime::RuntimeClient;

/// Fully wired services shared by every request handler.
#[derive(Clone)]
pub struct AgentServices {
    pub market: MarketContextService,
    pub trending: TrendingDiscovery,
    pub runtime: RuntimeClient,
}

/// Builder that wires one transport and the configured credentials into
/// discovery, the three providers, the aggregator and the runtime client.
///
/// # Example
///
/// ```rust,ignore
/// use persona_core::{AgentConfig, MarketContextBuilder};
///
/// let config = AgentConfig::from_env()?;
/// let services = MarketContextBuilder::new(&config).build();
/// let analysis = services.market.analyze().await?;
/// ```
pub struct MarketContextBuilder {
    config: AgentConfig,
    http_client: Option<Arc<dyn HttpClient>>,
}

impl MarketContextBuilder {
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            config: config.clone(),
            http_client: None,
        }
    }

    /// Use the given transport instead of a fresh reqwest client.
    pub fn with_http_client(mut self, http_client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn build(self) -> AgentServices {
        let http_client = self
            .http_client
            .unwrap_or_else(|| Arc::new(ReqwestHttpClient::new()));
        let timeout_ms = self.config.request_timeout_ms;
        let credentials = self.config.credentials;

        let trending = TrendingDiscovery::new(http_client.clone()).with_timeout_ms(timeout_ms);
        let aggregator = Aggregator::new(
            Arc::new(
                TwitterProvider::new(http_client.clone(), credentials.twitter_bearer_token)
                    .with_timeout_ms(timeout_ms),
            ),
            Arc::new(
                SantimentProvider::new(http_client.clone(), credentials.santiment_api_key)
                    .with_timeout_ms(timeout_ms),
            ),
            Arc::new(
                CryptopanicProvider::new(http_client.clone(), credentials.cryptopanic_api_key)
                    .with_timeout_ms(timeout_ms),
            ),
        );
        let runtime = RuntimeClient::new(
            http_client,
            self.config.bitte_api_url,
            self.config.bitte_api_key,
        )
        .with_timeout_ms(timeout_ms);

        AgentServices {
            market: MarketContextService::new(Arc::new(trending.clone()), aggregator),
            trending,
            runtime,
        }
    }
}
