use serde::{Deserialize, Serialize};

use crate::TrendingSymbol;

/// A single social post about a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPost {
    pub text: String,
    /// Likes plus reposts; missing metrics count as zero.
    pub engagement_score: u64,
    pub timestamp: String,
}

/// Recent social chatter for a symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialContext {
    pub posts: Vec<SocialPost>,
    pub volume: usize,
}

impl SocialContext {
    pub fn from_posts(posts: Vec<SocialPost>) -> Self {
        let volume = posts.len();
        Self { posts, volume }
    }
}

/// On-chain and social-volume metrics for a symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnChainContext {
    pub social_volume: f64,
    /// Not sourced from any provider yet; always zero.
    pub development_activity: f64,
    /// Not sourced from any provider yet; always zero.
    pub network_activity: f64,
}

impl OnChainContext {
    pub const fn with_social_volume(social_volume: f64) -> Self {
        Self {
            social_volume,
            development_activity: 0.0,
            network_activity: 0.0,
        }
    }
}

/// A news headline mentioning a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    pub published_at: String,
    pub source: String,
}

/// Hot news for a symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsContext {
    pub news: Vec<NewsItem>,
    pub news_count: usize,
}

impl NewsContext {
    pub fn from_items(news: Vec<NewsItem>) -> Self {
        let news_count = news.len();
        Self { news, news_count }
    }
}

/// Combined context for one trending symbol.
///
/// Every field is always present: a provider that failed contributes its
/// default value instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolContext {
    pub symbol: TrendingSymbol,
    pub social: SocialContext,
    pub on_chain: OnChainContext,
    pub news: NewsContext,
}

impl SymbolContext {
    /// Context carrying every provider's default value.
    pub fn defaults_for(symbol: TrendingSymbol) -> Self {
        Self {
            symbol,
            social: SocialContext::default(),
            on_chain: OnChainContext::default(),
            news: NewsContext::default(),
        }
    }
}

/// Market analysis handed to the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    /// Every discovered symbol, including those beyond the enrichment cap.
    pub trending_symbols: Vec<TrendingSymbol>,
    pub symbols_data: Vec<SymbolContext>,
}

/// Trending coin as listed by the discovery source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingCoin {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: Option<u32>,
    pub price_btc: Option<f64>,
    pub score: Option<u32>,
    pub slug: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_follow_sequence_lengths() {
        let social = SocialContext::from_posts(vec![SocialPost {
            text: String::from("gm"),
            engagement_score: 3,
            timestamp: String::from("2025-01-01T00:00:00Z"),
        }]);
        assert_eq!(social.volume, 1);

        let news = NewsContext::from_items(Vec::new());
        assert_eq!(news.news_count, 0);
    }

    #[test]
    fn symbol_context_serializes_with_camel_case_fields() {
        let symbol = TrendingSymbol::parse("btc").expect("valid symbol");
        let value = serde_json::to_value(SymbolContext::defaults_for(symbol)).expect("serialize");

        assert_eq!(
            value,
            json!({
                "symbol": "BTC",
                "social": { "posts": [], "volume": 0 },
                "onChain": {
                    "socialVolume": 0.0,
                    "developmentActivity": 0.0,
                    "networkActivity": 0.0
                },
                "news": { "news": [], "newsCount": 0 }
            })
        );
    }
}
