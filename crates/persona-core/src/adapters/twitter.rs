use std::sync::Arc;

use serde::Deserialize;

use crate::http_client::{HttpAuth, HttpClient, HttpRequest, DEFAULT_TIMEOUT_MS};
use crate::provider::{execute_json, require_credential, ContextProvider, ProviderFuture};
use crate::{ProviderId, ProviderResult, SocialContext, SocialPost, TrendingSymbol};

const SEARCH_URL: &str = "https://api.twitter.com/2/tweets/search/recent";
const MAX_RESULTS: u8 = 10;

/// Social provider backed by the X/Twitter recent-search API.
#[derive(Clone)]
pub struct TwitterProvider {
    http_client: Arc<dyn HttpClient>,
    bearer_token: Option<String>,
    timeout_ms: u64,
}

impl TwitterProvider {
    pub fn new(http_client: Arc<dyn HttpClient>, bearer_token: Option<String>) -> Self {
        Self {
            http_client,
            bearer_token,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Cashtag or plain-name mentions in English, excluding retweets.
    pub fn search_query(symbol: &TrendingSymbol) -> String {
        format!(
            "${} OR {} crypto -is:retweet lang:en",
            symbol.as_str(),
            symbol.as_str().to_lowercase()
        )
    }

    fn build_request(&self, symbol: &TrendingSymbol, bearer_token: &str) -> HttpRequest {
        let url = format!(
            "{SEARCH_URL}?query={}&max_results={MAX_RESULTS}&tweet.fields=public_metrics,created_at",
            urlencoding::encode(&Self::search_query(symbol)),
        );

        HttpRequest::get(url)
            .with_auth(&HttpAuth::BearerToken(bearer_token.to_owned()))
            .with_timeout_ms(self.timeout_ms)
    }

    async fn fetch_social(&self, symbol: &TrendingSymbol) -> ProviderResult<SocialContext> {
        let bearer_token = require_credential(self.id(), self.bearer_token.as_deref())?;
        let request = self.build_request(symbol, bearer_token);

        let response: TwitterSearchResponse =
            execute_json(self.http_client.as_ref(), self.id(), request).await?;

        let posts = response
            .data
            .unwrap_or_default()
            .into_iter()
            .map(Tweet::into_post)
            .collect();

        Ok(SocialContext::from_posts(posts))
    }
}

impl ContextProvider for TwitterProvider {
    type Context = SocialContext;

    fn id(&self) -> ProviderId {
        ProviderId::Twitter
    }

    fn fetch<'a>(&'a self, symbol: &'a TrendingSymbol) -> ProviderFuture<'a, SocialContext> {
        Box::pin(self.fetch_social(symbol))
    }
}

// Twitter response structures

#[derive(Debug, Deserialize)]
struct TwitterSearchResponse {
    // Absent entirely when the search matched nothing.
    #[serde(default)]
    data: Option<Vec<Tweet>>,
}

#[derive(Debug, Deserialize)]
struct Tweet {
    text: String,
    #[serde(default)]
    created_at: String,
    #[serde(default)]
    public_metrics: Option<PublicMetrics>,
}

#[derive(Debug, Default, Deserialize)]
struct PublicMetrics {
    #[serde(default)]
    like_count: Option<u64>,
    #[serde(default)]
    retweet_count: Option<u64>,
}

impl Tweet {
    fn into_post(self) -> SocialPost {
        let metrics = self.public_metrics.unwrap_or_default();
        SocialPost {
            text: self.text,
            engagement_score: metrics.like_count.unwrap_or(0) + metrics.retweet_count.unwrap_or(0),
            timestamp: self.created_at,
        }
    }
}
