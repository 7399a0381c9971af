use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime, UtcOffset};

use crate::http_client::{HttpAuth, HttpClient, HttpRequest, DEFAULT_TIMEOUT_MS};
use crate::provider::{
    execute_json, require_credential, ContextProvider, ProviderError, ProviderFuture,
};
use crate::{OnChainContext, ProviderId, ProviderResult, TrendingSymbol};

const GRAPHQL_URL: &str = "https://api.santiment.net/graphql";
const SOCIAL_VOLUME_METRIC: &str = "social_volume_total";
const WINDOW: Duration = Duration::hours(24);
const INTERVAL: &str = "1h";

/// On-chain provider backed by the Santiment GraphQL API.
///
/// Only social volume is sourced; development and network activity stay
/// at zero until a real upstream metric is wired in.
#[derive(Clone)]
pub struct SantimentProvider {
    http_client: Arc<dyn HttpClient>,
    api_key: Option<String>,
    timeout_ms: u64,
}

impl SantimentProvider {
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

    /// Hourly social-volume query over the 24 hours ending at `now`.
    pub fn metric_query(symbol: &TrendingSymbol, now: OffsetDateTime) -> ProviderResult<String> {
        let from = iso_timestamp(now - WINDOW)?;
        let to = iso_timestamp(now)?;
        Ok(format!(
            r#"{{
  getMetric(metric: "{SOCIAL_VOLUME_METRIC}") {{
    timeseriesData(
      slug: "{slug}"
      from: "{from}"
      to: "{to}"
      interval: "{INTERVAL}"
    ) {{
      datetime
      value
    }}
  }}
}}"#,
            slug = symbol.as_str().to_lowercase(),
        ))
    }

    fn build_request(
        &self,
        symbol: &TrendingSymbol,
        api_key: &str,
        now: OffsetDateTime,
    ) -> ProviderResult<HttpRequest> {
        let body = json!({ "query": Self::metric_query(symbol, now)? });

        Ok(HttpRequest::post(GRAPHQL_URL)
            .with_auth(&HttpAuth::ApiKey(api_key.to_owned()))
            .with_body(body.to_string())
            .with_timeout_ms(self.timeout_ms))
    }

    async fn fetch_on_chain(&self, symbol: &TrendingSymbol) -> ProviderResult<OnChainContext> {
        let api_key = require_credential(self.id(), self.api_key.as_deref())?;
        let request = self.build_request(symbol, api_key, OffsetDateTime::now_utc())?;

        let response: SantimentResponse =
            execute_json(self.http_client.as_ref(), self.id(), request).await?;

        if let Some(error) = response.errors.unwrap_or_default().into_iter().next() {
            return Err(ProviderError::upstream(
                self.id(),
                format!("santiment query failed: {}", error.message),
            ));
        }

        let social_volume = response
            .data
            .and_then(|data| data.get_metric)
            .map(|metric| metric.timeseries_data.iter().filter_map(|point| point.value).sum())
            .unwrap_or(0.0);

        Ok(OnChainContext::with_social_volume(social_volume))
    }
}

impl ContextProvider for SantimentProvider {
    type Context = OnChainContext;

    fn id(&self) -> ProviderId {
        ProviderId::Santiment
    }

    fn fetch<'a>(&'a self, symbol: &'a TrendingSymbol) -> ProviderFuture<'a, OnChainContext> {
        Box::pin(self.fetch_on_chain(symbol))
    }
}

/// RFC 3339 in UTC at whole-second precision, e.g. `2025-03-01T12:30:15Z`.
fn iso_timestamp(value: OffsetDateTime) -> ProviderResult<String> {
    value
        .to_offset(UtcOffset::UTC)
        .replace_nanosecond(0)
        .map_err(|error| ProviderError::parse(ProviderId::Santiment, error.to_string()))?
        .format(&Rfc3339)
        .map_err(|error| ProviderError::parse(ProviderId::Santiment, error.to_string()))
}

// Santiment response structures

#[derive(Debug, Deserialize)]
struct SantimentResponse {
    #[serde(default)]
    data: Option<SantimentData>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct SantimentData {
    #[serde(rename = "getMetric", default)]
    get_metric: Option<MetricData>,
}

#[derive(Debug, Deserialize)]
struct MetricData {
    #[serde(rename = "timeseriesData", default)]
    timeseries_data: Vec<TimeseriesPoint>,
}

#[derive(Debug, Deserialize)]
struct TimeseriesPoint {
    #[serde(default)]
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    #[serde(default)]
    message: String,
}
