//! Provider contract and error types.
//!
//! Every upstream data source implements [`ContextProvider`]: one symbol in,
//! one [`ProviderResult`] out. Faults never escape a provider as panics;
//! missing credentials, transport errors, non-2xx statuses and malformed
//! bodies all come back as a [`ProviderError`] value that the aggregator
//! replaces with the provider's default context.
//!
//! | Kind | Code | Raised when |
//! |------|------|-------------|
//! | `MissingCredential` | `provider.missing_credential` | no token/key configured |
//! | `Transport` | `provider.transport` | connection or body read failed |
//! | `Timeout` | `provider.timeout` | request exceeded its timeout |
//! | `HttpStatus` | `provider.http_status` | upstream returned non-2xx |
//! | `Parse` | `provider.parse` | body did not match the expected schema |
//! | `Upstream` | `provider.upstream` | upstream reported an error in a 2xx body |

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::de::DeserializeOwned;

use crate::http_client::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::{ProviderId, TrendingSymbol};

/// Provider-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    MissingCredential,
    Transport,
    Timeout,
    HttpStatus,
    Parse,
    Upstream,
}

/// Structured provider failure. Carried as a value, never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    provider: ProviderId,
    kind: ProviderErrorKind,
    message: String,
}

impl ProviderError {
    pub fn missing_credential(provider: ProviderId) -> Self {
        Self {
            provider,
            kind: ProviderErrorKind::MissingCredential,
            message: String::from("missing credential"),
        }
    }

    pub fn transport(provider: ProviderId, error: &HttpError) -> Self {
        let kind = if error.timed_out() {
            ProviderErrorKind::Timeout
        } else {
            ProviderErrorKind::Transport
        };
        Self {
            provider,
            kind,
            message: error.message().to_owned(),
        }
    }

    pub fn http_status(provider: ProviderId, status: u16) -> Self {
        Self {
            provider,
            kind: ProviderErrorKind::HttpStatus,
            message: format!("{provider} API error: {status}"),
        }
    }

    pub fn parse(provider: ProviderId, message: impl Into<String>) -> Self {
        Self {
            provider,
            kind: ProviderErrorKind::Parse,
            message: message.into(),
        }
    }

    pub fn upstream(provider: ProviderId, message: impl Into<String>) -> Self {
        Self {
            provider,
            kind: ProviderErrorKind::Upstream,
            message: message.into(),
        }
    }

    pub const fn provider(&self) -> ProviderId {
        self.provider
    }

    pub const fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ProviderErrorKind::MissingCredential => "provider.missing_credential",
            ProviderErrorKind::Transport => "provider.transport",
            ProviderErrorKind::Timeout => "provider.timeout",
            ProviderErrorKind::HttpStatus => "provider.http_status",
            ProviderErrorKind::Parse => "provider.parse",
            ProviderErrorKind::Upstream => "provider.upstream",
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.provider, self.message, self.code())
    }
}

impl std::error::Error for ProviderError {}

/// Outcome of one provider call.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Boxed future returned by [`ContextProvider::fetch`].
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = ProviderResult<T>> + Send + 'a>>;

/// Per-symbol context provider contract.
///
/// Implementations own their credential, request shape and response
/// shaping. `Context::default()` is the documented fallback value used
/// when a call fails.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use persona_core::{ContextProvider, ProviderFuture, ProviderId, TrendingSymbol};
///
/// struct Silent;
///
/// impl ContextProvider for Silent {
///     type Context = persona_core::NewsContext;
///
///     fn id(&self) -> ProviderId {
///         ProviderId::Cryptopanic
///     }
///
///     fn fetch<'a>(&'a self, _symbol: &'a TrendingSymbol) -> ProviderFuture<'a, Self::Context> {
///         Box::pin(async { Ok(Self::Context::default()) })
///     }
/// }
/// ```
pub trait ContextProvider: Send + Sync {
    type Context: Default + Send;

    /// Returns the provider identifier used in logs and error codes.
    fn id(&self) -> ProviderId;

    /// Fetches this provider's context for one symbol.
    ///
    /// Issues at most one HTTP call and never retries.
    fn fetch<'a>(&'a self, symbol: &'a TrendingSymbol) -> ProviderFuture<'a, Self::Context>;
}

/// Issues one request and decodes a 2xx JSON body into `T`.
pub(crate) async fn execute_json<T: DeserializeOwned>(
    http_client: &dyn HttpClient,
    provider: ProviderId,
    request: HttpRequest,
) -> ProviderResult<T> {
    tracing::debug!(
        provider = %provider,
        url = request.redacted_url(),
        "issuing provider request"
    );

    let response = http_client
        .execute(request)
        .await
        .map_err(|error| ProviderError::transport(provider, &error))?;

    decode_json(provider, &response)
}

pub(crate) fn decode_json<T: DeserializeOwned>(
    provider: ProviderId,
    response: &HttpResponse,
) -> ProviderResult<T> {
    if !response.is_success() {
        return Err(ProviderError::http_status(provider, response.status));
    }

    serde_json::from_str(&response.body).map_err(|error| {
        ProviderError::parse(provider, format!("failed to parse {provider} response: {error}"))
    })
}

/// Returns the configured credential, treating blank values as absent.
pub(crate) fn require_credential(
    provider: ProviderId,
    credential: Option<&str>,
) -> ProviderResult<&str> {
    credential
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ProviderError::missing_credential(provider))
}
