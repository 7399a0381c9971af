//! Concurrent per-symbol enrichment.
//!
//! For every selected symbol the social, on-chain and news providers are
//! polled together and joined with settle-all semantics: a failed call is
//! logged and replaced with that provider's default context, and never
//! cancels its siblings.

use std::sync::Arc;

use futures::future::join_all;

use crate::provider::{ContextProvider, ProviderErrorKind, ProviderResult};
use crate::{NewsContext, OnChainContext, SocialContext, SymbolContext, TrendingSymbol};

/// Number of leading symbols that receive provider enrichment.
pub const MAX_ENRICHED_SYMBOLS: usize = 3;

pub type SocialProvider = Arc<dyn ContextProvider<Context = SocialContext>>;
pub type OnChainProvider = Arc<dyn ContextProvider<Context = OnChainContext>>;
pub type NewsProvider = Arc<dyn ContextProvider<Context = NewsContext>>;

/// Fans out the three provider calls per symbol and joins them.
///
/// Holds no per-request state, so repeated calls with identical provider
/// responses produce identical output.
#[derive(Clone)]
pub struct Aggregator {
    social: SocialProvider,
    on_chain: OnChainProvider,
    news: NewsProvider,
}

impl Aggregator {
    pub fn new(social: SocialProvider, on_chain: OnChainProvider, news: NewsProvider) -> Self {
        Self {
            social,
            on_chain,
            news,
        }
    }

    /// Returns exactly `min(symbols.len(), MAX_ENRICHED_SYMBOLS)` contexts in
    /// input order.
    pub async fn aggregate(&self, symbols: &[TrendingSymbol]) -> Vec<SymbolContext> {
        join_all(
            symbols
                .iter()
                .take(MAX_ENRICHED_SYMBOLS)
                .map(|symbol| self.enrich(symbol)),
        )
        .await
    }

    async fn enrich(&self, symbol: &TrendingSymbol) -> SymbolContext {
        let (social, on_chain, news) = tokio::join!(
            self.social.fetch(symbol),
            self.on_chain.fetch(symbol),
            self.news.fetch(symbol),
        );

        SymbolContext {
            symbol: symbol.clone(),
            social: settle(symbol, social),
            on_chain: settle(symbol, on_chain),
            news: settle(symbol, news),
        }
    }
}

/// Resolves one provider outcome, substituting the default on failure.
fn settle<T: Default>(symbol: &TrendingSymbol, result: ProviderResult<T>) -> T {
    match result {
        Ok(context) => context,
        Err(error) if error.kind() == ProviderErrorKind::MissingCredential => {
            tracing::debug!(
                symbol = %symbol,
                provider = %error.provider(),
                "provider not configured; using default context"
            );
            T::default()
        }
        Err(error) => {
            tracing::warn!(
                symbol = %symbol,
                provider = %error.provider(),
                code = error.code(),
                error = %error,
                "provider call failed; using default context"
            );
            T::default()
        }
    }
}
