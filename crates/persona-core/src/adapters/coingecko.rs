use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::discovery::{fallback_symbols, DiscoveryFuture, SymbolDiscovery};
use crate::http_client::{HttpClient, HttpRequest, DEFAULT_TIMEOUT_MS};
use crate::provider::execute_json;
use crate::{ProviderId, ProviderResult, TrendingCoin, TrendingSymbol};

const TRENDING_URL: &str = "https://api.coingecko.com/api/v3/search/trending";

/// Trending-list source backed by the public CoinGecko search endpoint.
///
/// Needs no credential. [`TrendingDiscovery::trending_coins`] reports
/// failures to the caller, while [`SymbolDiscovery::discover`] absorbs
/// them into the fallback list.
#[derive(Clone)]
pub struct TrendingDiscovery {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl TrendingDiscovery {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    async fn fetch<T: DeserializeOwned>(&self) -> ProviderResult<TrendingResponse<T>> {
        let request = HttpRequest::get(TRENDING_URL)
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms);

        execute_json(self.http_client.as_ref(), ProviderId::Coingecko, request).await
    }

    /// Current trending coins in the order CoinGecko lists them.
    pub async fn trending_coins(&self) -> ProviderResult<Vec<TrendingCoin>> {
        let response: TrendingResponse<TrendingItem> = self.fetch().await?;

        Ok(response
            .into_items()
            .map(TrendingItem::into_coin)
            .collect())
    }

    // Decodes only the ticker, so odd values in unrelated fields never
    // cost the whole list.
    async fn discover_symbols(&self) -> Vec<TrendingSymbol> {
        let tickers = match self.fetch::<TickerItem>().await {
            Ok(response) => response.into_items(),
            Err(error) => {
                tracing::warn!(
                    provider = %error.provider(),
                    code = error.code(),
                    error = %error,
                    "trending discovery failed; using fallback symbols"
                );
                return fallback_symbols();
            }
        };

        let symbols: Vec<TrendingSymbol> = tickers
            .filter_map(|item| match TrendingSymbol::parse(&item.symbol) {
                Ok(symbol) => Some(symbol),
                Err(error) => {
                    tracing::warn!(ticker = %item.symbol, %error, "skipping unusable ticker");
                    None
                }
            })
            .collect();

        if symbols.is_empty() {
            tracing::warn!("trending source returned no usable symbols; using fallback symbols");
            return fallback_symbols();
        }

        symbols
    }
}

impl SymbolDiscovery for TrendingDiscovery {
    fn discover<'a>(&'a self) -> DiscoveryFuture<'a> {
        Box::pin(self.discover_symbols())
    }
}

// CoinGecko response structures

#[derive(Debug, Deserialize)]
struct TrendingResponse<T> {
    coins: Option<Vec<TrendingEntry<T>>>,
}

impl<T> TrendingResponse<T> {
    fn into_items(self) -> impl Iterator<Item = T> {
        self.coins.unwrap_or_default().into_iter().map(|entry| entry.item)
    }
}

#[derive(Debug, Deserialize)]
struct TrendingEntry<T> {
    item: T,
}

#[derive(Debug, Deserialize)]
struct TickerItem {
    #[serde(default)]
    symbol: String,
}

#[derive(Debug, Deserialize)]
struct TrendingItem {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    market_cap_rank: Option<u32>,
    #[serde(default)]
    price_btc: Option<f64>,
    #[serde(default)]
    score: Option<u32>,
    #[serde(default)]
    slug: Option<String>,
}

impl TrendingItem {
    fn into_coin(self) -> TrendingCoin {
        TrendingCoin {
            id: self.id,
            name: self.name,
            symbol: self.symbol,
            market_cap_rank: self.market_cap_rank,
            price_btc: self.price_btc,
            score: self.score,
            slug: self.slug,
        }
    }
}
