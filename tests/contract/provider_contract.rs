use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use persona_core::{
    ContextProvider, CryptopanicProvider, HttpClient, HttpError, HttpFuture, HttpRequest,
    HttpResponse, ProviderErrorKind, ProviderId, SantimentProvider, TrendingSymbol,
    TwitterProvider,
};

/// Transport returning one canned response for every request.
struct CannedTransport {
    response: Result<HttpResponse, HttpError>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl CannedTransport {
    fn new(response: Result<HttpResponse, HttpError>) -> Arc<Self> {
        Arc::new(Self {
            response,
            requests: Mutex::default(),
        })
    }

    fn request_count(&self) -> usize {
        self.requests.lock().expect("request log").len()
    }
}

impl HttpClient for CannedTransport {
    fn execute<'a>(&'a self, request: HttpRequest) -> HttpFuture<'a> {
        self.requests.lock().expect("request log").push(request);
        let response = self.response.clone();
        Box::pin(async move { response })
    }
}

fn btc() -> TrendingSymbol {
    TrendingSymbol::parse("btc").expect("valid symbol")
}

/// Builds each provider against a transport, with or without a credential.
type Factory<P> = fn(Arc<dyn HttpClient>, Option<String>) -> P;

async fn assert_contract<P>(factory: Factory<P>, expected_id: ProviderId, empty_body: &str)
where
    P: ContextProvider,
    P::Context: Debug + PartialEq,
{
    // Missing credential: immediate failure, no request.
    let transport = CannedTransport::new(Ok(HttpResponse::ok_json(empty_body)));
    let provider = factory(transport.clone(), None);
    assert_eq!(provider.id(), expected_id);
    let error = provider.fetch(&btc()).await.expect_err("missing credential");
    assert_eq!(error.kind(), ProviderErrorKind::MissingCredential, "{expected_id}");
    assert_eq!(error.provider(), expected_id);
    assert_eq!(transport.request_count(), 0, "{expected_id}: no request without credential");

    // Non-success status.
    let transport = CannedTransport::new(Ok(HttpResponse::new(503, "{}")));
    let error = factory(transport.clone(), Some(String::from("key")))
        .fetch(&btc())
        .await
        .expect_err("503");
    assert_eq!(error.kind(), ProviderErrorKind::HttpStatus, "{expected_id}");
    assert_eq!(transport.request_count(), 1, "{expected_id}: exactly one attempt");

    // Network error.
    let transport = CannedTransport::new(Err(HttpError::new("connection reset")));
    let error = factory(transport, Some(String::from("key")))
        .fetch(&btc())
        .await
        .expect_err("transport");
    assert_eq!(error.kind(), ProviderErrorKind::Transport, "{expected_id}");

    // Malformed body.
    let transport = CannedTransport::new(Ok(HttpResponse::ok_json("<html>")));
    let error = factory(transport, Some(String::from("key")))
        .fetch(&btc())
        .await
        .expect_err("parse");
    assert_eq!(error.kind(), ProviderErrorKind::Parse, "{expected_id}");

    // Empty but valid body resolves to the documented default.
    let transport = CannedTransport::new(Ok(HttpResponse::ok_json(empty_body)));
    let context = factory(transport, Some(String::from("key")))
        .fetch(&btc())
        .await
        .unwrap_or_else(|error| panic!("{expected_id}: empty body should succeed: {error}"));
    assert_eq!(context, P::Context::default(), "{expected_id}");
}

#[tokio::test]
async fn social_provider_honours_the_contract() {
    assert_contract::<TwitterProvider>(TwitterProvider::new, ProviderId::Twitter, "{}").await;
}

#[tokio::test]
async fn on_chain_provider_honours_the_contract() {
    assert_contract::<SantimentProvider>(
        SantimentProvider::new,
        ProviderId::Santiment,
        r#"{"data":{"getMetric":{"timeseriesData":[]}}}"#,
    )
    .await;
}

#[tokio::test]
async fn news_provider_honours_the_contract() {
    assert_contract::<CryptopanicProvider>(
        CryptopanicProvider::new,
        ProviderId::Cryptopanic,
        r#"{"results":[]}"#,
    )
    .await;
}
