//! Trade-decision forwarding to the hosted agent runtime.
//!
//! The runtime's answer is relayed untouched: its status code and its body
//! (JSON when it parses, otherwise wrapped as `{"raw": ...}`).

use std::sync::Arc;

use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::http_client::{HttpAuth, HttpClient, HttpError, HttpRequest, DEFAULT_TIMEOUT_MS};
use crate::{ProviderId, ValidationError};

const RUNTIME_AGENT_ID: &str = "near-cow-agent.vercel.app";
const RUNTIME_MODE: &str = "default";

/// Validated inputs of a trade-decision request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeRequest {
    description: String,
    persona_address: String,
    trending_coins: String,
}

impl TradeRequest {
    /// All three inputs are required; the error names every missing one.
    pub fn new(
        description: Option<&str>,
        persona_address: Option<&str>,
        trending_coins: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let fields = [
            ("description", description),
            ("personaAddress", persona_address),
            ("trendingCoins", trending_coins),
        ];
        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.map_or(true, |value| value.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect();

        match (description, persona_address, trending_coins) {
            (Some(description), Some(persona_address), Some(trending_coins)) if missing.is_empty() => {
                Ok(Self {
                    description: description.to_owned(),
                    persona_address: persona_address.to_owned(),
                    trending_coins: trending_coins.to_owned(),
                })
            }
            _ => Err(ValidationError::MissingTradeParameters { missing }),
        }
    }

    pub fn persona_address(&self) -> &str {
        &self.persona_address
    }

    /// The single user message sent to the runtime.
    pub fn prompt(&self) -> String {
        format!(
            "Generate a trade decision for the following persona based on the trending coins data: \n\
             (start of description)\n\
             {description}\n\
             (end of description)\n\
             \n\
             (start of trending coins)\n\
             {coins}\n\
             (end of trending coins)\n\
             \n\
             Consider the act of selling as swapping an asset for stablecoins such as USDC and buying as swapping stablecoins for an asset.\n",
            description = self.description,
            coins = self.trending_coins,
        )
    }

    /// Chat body understood by the runtime.
    pub fn to_runtime_payload(&self, chat_id: &str) -> Value {
        json!({
            "id": chat_id,
            "evmAddress": self.persona_address,
            "messages": [
                { "role": "user", "content": self.prompt() }
            ],
            "config": {
                "mode": RUNTIME_MODE,
                "agentId": RUNTIME_AGENT_ID,
            },
        })
    }
}

/// Runtime response relayed to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeReply {
    pub status: u16,
    pub body: Value,
}

impl RuntimeReply {
    fn from_body(status: u16, body: &str) -> Self {
        let body = serde_json::from_str(body).unwrap_or_else(|_| json!({ "raw": body }));
        Self { status, body }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("agent runtime request failed: {0}")]
    Transport(String),
}

impl From<HttpError> for RuntimeError {
    fn from(error: HttpError) -> Self {
        Self::Transport(error.message().to_owned())
    }
}

/// Client for the agent runtime chat endpoint.
#[derive(Clone)]
pub struct RuntimeClient {
    http_client: Arc<dyn HttpClient>,
    url: String,
    api_key: Option<String>,
    timeout_ms: u64,
}

impl RuntimeClient {
    pub fn new(http_client: Arc<dyn HttpClient>, url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http_client,
            url: url.into(),
            api_key,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Posts one chat to the runtime under a fresh chat id. No retry.
    ///
    /// An unset key is sent as an empty bearer token and left for the
    /// runtime to reject.
    pub async fn forward(&self, request: &TradeRequest) -> Result<RuntimeReply, RuntimeError> {
        let chat_id = Uuid::new_v4().to_string();
        let payload = request.to_runtime_payload(&chat_id);
        let token = self.api_key.clone().unwrap_or_default();

        tracing::info!(
            provider = %ProviderId::Bitte,
            chat_id = %chat_id,
            persona = request.persona_address(),
            "forwarding trade decision to agent runtime"
        );

        let http_request = HttpRequest::post(self.url.as_str())
            .with_auth(&HttpAuth::BearerToken(token))
            .with_body(payload.to_string())
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(http_request).await.map_err(|error| {
            tracing::warn!(
                provider = %ProviderId::Bitte,
                chat_id = %chat_id,
                error = %error,
                "agent runtime unreachable"
            );
            RuntimeError::from(error)
        })?;

        Ok(RuntimeReply::from_body(response.status, &response.body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::HttpResponse;
    use crate::testing::ScriptedHttpClient;

    const RUNTIME_URL: &str = "https://runtime.example/chat";

    fn trade() -> TradeRequest {
        TradeRequest::new(Some("Pirate"), Some("0xabc"), Some("PEPE,SOL")).expect("valid trade")
    }

    #[test]
    fn new_lists_every_missing_parameter() {
        let error = TradeRequest::new(None, Some("0xabc"), Some("  ")).expect_err("missing");
        assert_eq!(
            error,
            ValidationError::MissingTradeParameters {
                missing: vec!["description", "trendingCoins"]
            }
        );
        assert_eq!(
            error.to_string(),
            "missing required parameters: description, trendingCoins"
        );
    }

    #[test]
    fn payload_matches_runtime_chat_shape() {
        let payload = trade().to_runtime_payload("chat-1");

        assert_eq!(payload["id"], "chat-1");
        assert_eq!(payload["evmAddress"], "0xabc");
        assert_eq!(payload["messages"][0]["role"], "user");
        assert_eq!(payload["config"], json!({"mode": "default", "agentId": "near-cow-agent.vercel.app"}));

        let content = payload["messages"][0]["content"].as_str().expect("content");
        assert!(content.contains("(start of description)\nPirate\n(end of description)"));
        assert!(content.contains("(start of trending coins)\nPEPE,SOL\n(end of trending coins)"));
        assert!(content.contains("swapping an asset for stablecoins"));
    }

    #[tokio::test]
    async fn forward_posts_with_bearer_and_relays_status_and_json() {
        let client = Arc::new(ScriptedHttpClient::new().route(
            RUNTIME_URL,
            Ok(HttpResponse::new(201, r#"{"decision":"buy"}"#)),
        ));
        let runtime = RuntimeClient::new(client.clone(), RUNTIME_URL, Some(String::from("bitte")));

        let reply = runtime.forward(&trade()).await.expect("forwarded");
        assert_eq!(reply.status, 201);
        assert_eq!(reply.body, json!({"decision": "buy"}));

        let requests = client.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].headers.get("authorization").map(String::as_str),
            Some("Bearer bitte")
        );
        let body: Value =
            serde_json::from_str(requests[0].body.as_deref().expect("body")).expect("json body");
        let chat_id = body["id"].as_str().expect("chat id");
        assert!(Uuid::parse_str(chat_id).is_ok());
    }

    #[tokio::test]
    async fn non_json_reply_is_wrapped_and_missing_key_is_empty_bearer() {
        let client = Arc::new(
            ScriptedHttpClient::new().route(RUNTIME_URL, Ok(HttpResponse::new(401, "unauthorized"))),
        );
        let runtime = RuntimeClient::new(client.clone(), RUNTIME_URL, None);

        let reply = runtime.forward(&trade()).await.expect("forwarded");
        assert_eq!(reply.status, 401);
        assert_eq!(reply.body, json!({"raw": "unauthorized"}));
        assert_eq!(
            client.recorded_requests()[0].headers.get("authorization").map(String::as_str),
            Some("Bearer ")
        );
    }

    #[tokio::test]
    async fn transport_failure_is_an_error() {
        let client = Arc::new(
            ScriptedHttpClient::new().route(RUNTIME_URL, Err(HttpError::new("connection refused"))),
        );
        let runtime = RuntimeClient::new(client, RUNTIME_URL, Some(String::from("bitte")));

        let error = runtime.forward(&trade()).await.expect_err("unreachable");
        assert_eq!(
            error.to_string(),
            "agent runtime request failed: connection refused"
        );
    }
}
