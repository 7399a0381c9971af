use std::sync::Arc;

use serde::Deserialize;

use crate::http_client::{HttpClient, HttpRequest, DEFAULT_TIMEOUT_MS};
use crate::provider::{execute_json, require_credential, ContextProvider, ProviderFuture};
use crate::{NewsContext, NewsItem, ProviderId, ProviderResult, TrendingSymbol};

const POSTS_URL: &str = "https://cryptopanic.com/api/v1/posts/";
const UNKNOWN_SOURCE: &str = "Unknown";

/// News provider backed by the CryptoPanic posts API (hot news only).
#[derive(Clone)]
pub struct CryptopanicProvider {
    http_client: Arc<dyn HttpClient>,
    api_key: Option<String>,
    timeout_ms: u64,
}

impl CryptopanicProvider {
    pub fn new(http_client: Arc<dyn HttpClient>, api_key: Option<String>) -> Self {
        Self {
            http_client,
            api_key,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    fn build_request(&self, symbol: &TrendingSymbol, api_key: &str) -> HttpRequest {
        // The key travels in the query string; logging goes through redacted_url().
        let url = format!(
            "{POSTS_URL}?auth_token={}&currencies={}&kind=news&filter=hot",
            urlencoding::encode(api_key),
            urlencoding::encode(symbol.as_str()),
        );

        HttpRequest::get(url).with_timeout_ms(self.timeout_ms)
    }

    async fn fetch_news(&self, symbol: &TrendingSymbol) -> ProviderResult<NewsContext> {
        let api_key = require_credential(self.id(), self.api_key.as_deref())?;
        let request = self.build_request(symbol, api_key);

        let response: PostsResponse =
            execute_json(self.http_client.as_ref(), self.id(), request).await?;

        let items = response
            .results
            .unwrap_or_default()
            .into_iter()
            .map(Post::into_item)
            .collect();

        Ok(NewsContext::from_items(items))
    }
}

impl ContextProvider for CryptopanicProvider {
    type Context = NewsContext;

    fn id(&self) -> ProviderId {
        ProviderId::Cryptopanic
    }

    fn fetch<'a>(&'a self, symbol: &'a TrendingSymbol) -> ProviderFuture<'a, NewsContext> {
        Box::pin(self.fetch_news(symbol))
    }
}

#[derive(Debug, Deserialize)]
struct PostsResponse {
    #[serde(default)]
    results: Option<Vec<Post>>,
}

#[derive(Debug, Deserialize)]
struct Post {
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    published_at: String,
    #[serde(default)]
    source: Option<PostSource>,
}

#[derive(Debug, Deserialize)]
struct PostSource {
    #[serde(default)]
    title: Option<String>,
}

impl Post {
    fn into_item(self) -> NewsItem {
        let source = self
            .source
            .and_then(|source| source.title)
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| String::from(UNKNOWN_SOURCE));

        NewsItem {
            title: self.title,
            url: self.url,
            published_at: self.published_at,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::HttpResponse;
    use crate::provider::ProviderErrorKind;
    use crate::testing::ScriptedHttpClient;

    fn symbol(raw: &str) -> TrendingSymbol {
        TrendingSymbol::parse(raw).expect("valid symbol")
    }

    #[tokio::test]
    async fn request_filters_hot_news_for_the_symbol() {
        let client = Arc::new(
            ScriptedHttpClient::new().route(POSTS_URL, Ok(HttpResponse::ok_json(r#"{"results":[]}"#))),
        );
        let provider = CryptopanicProvider::new(client.clone(), Some(String::from("cp key")));

        let context = provider.fetch(&symbol("SOL")).await.expect("fetch succeeds");
        assert_eq!(context, NewsContext::default());

        let requests = client.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].url,
            "https://cryptopanic.com/api/v1/posts/?auth_token=cp%20key&currencies=SOL&kind=news&filter=hot"
        );
        assert_eq!(requests[0].redacted_url(), POSTS_URL);
        assert!(!requests[0].headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn maps_posts_and_defaults_missing_source_to_unknown() {
        let body = r#"{
            "count": 3,
            "results": [
                {"title": "ETH ETF approved", "url": "https://example.com/a",
                 "published_at": "2025-01-01T00:00:00Z", "source": {"title": "CoinDesk"}},
                {"title": "Gas fees drop", "url": "https://example.com/b",
                 "published_at": "2025-01-01T01:00:00Z"},
                {"title": "Blank source", "published_at": "2025-01-01T02:00:00Z",
                 "source": {"title": "  "}}
            ]
        }"#;
        let client =
            Arc::new(ScriptedHttpClient::new().route(POSTS_URL, Ok(HttpResponse::ok_json(body))));
        let provider = CryptopanicProvider::new(client, Some(String::from("cp-key")));

        let context = provider.fetch(&symbol("ETH")).await.expect("fetch succeeds");

        assert_eq!(context.news_count, 3);
        let sources: Vec<&str> = context.news.iter().map(|item| item.source.as_str()).collect();
        assert_eq!(sources, vec!["CoinDesk", "Unknown", "Unknown"]);
        assert_eq!(context.news[0].url, "https://example.com/a");
        assert_eq!(context.news[2].url, "");
    }

    #[tokio::test]
    async fn missing_results_yield_empty_context() {
        let client = Arc::new(
            ScriptedHttpClient::new().route(POSTS_URL, Ok(HttpResponse::ok_json(r#"{"count":0}"#))),
        );
        let provider = CryptopanicProvider::new(client, Some(String::from("cp-key")));

        let context = provider.fetch(&symbol("ADA")).await.expect("fetch succeeds");
        assert_eq!(context.news_count, 0);
    }

    #[tokio::test]
    async fn server_error_is_a_failure() {
        let client = Arc::new(
            ScriptedHttpClient::new().route(POSTS_URL, Ok(HttpResponse::new(502, "bad gateway"))),
        );
        let provider = CryptopanicProvider::new(client, Some(String::from("cp-key")));

        let error = provider.fetch(&symbol("ADA")).await.expect_err("502 fails");
        assert_eq!(error.kind(), ProviderErrorKind::HttpStatus);
        assert_eq!(error.message(), "cryptopanic API error: 502");
    }

    #[tokio::test]
    async fn missing_key_fails_without_network_call() {
        let client = Arc::new(ScriptedHttpClient::new());
        let provider = CryptopanicProvider::new(client.clone(), None);

        let error = provider.fetch(&symbol("BTC")).await.expect_err("no key");
        assert_eq!(error.kind(), ProviderErrorKind::MissingCredential);
        assert!(client.recorded_requests().is_empty());
    }
}
