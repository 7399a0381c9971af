//! OpenAPI capability descriptor consumed by the agent registry.

use serde_json::{json, Map, Value};

use crate::AgentConfig;

pub const AGENT_NAME: &str = "Trading Personas Agent";
const AGENT_SUMMARY: &str = "An agent that creates trading personas and interprets how they would trade based on their description to make automated trades.";
const REPOSITORY_URL: &str = "https://github.com/Gallen9/trading-personas-agent";
const CATEGORIES: [&str; 4] = ["DeFi", "Social", "Trading", "Automation"];
const CHAIN_IDS: [&str; 3] = ["near", "1", "8453"];

const INSTRUCTIONS: &str = "You can create trading personas and also make a trading decision as if you were the persona. \
To make a trading decision use the get-persona tool to get a persona's details, the get-portfolio tool to get a persona's portfolio and the market-analysis tool for social, on-chain and news context on trending coins. \
Then make a trading decision based on the persona's description and the trending coins. The decisions can be BUY, SELL, or HOLD. \
BUY means you turn some stablecoin into the coin you want to buy. SELL means you turn the coin you want to sell into stablecoin. HOLD means you do nothing. \
If you decide to buy or sell, generate a swap transaction through the /trade path tool. \
You can also create a persona when you are given a name and description of a persona. \
You should look for trading behavior and specific instructions to make trades in that description.";

/// Builds the descriptor for the given deployment.
pub fn descriptor(config: &AgentConfig) -> Value {
    let base_url = config.public_base_url.trim_end_matches('/');

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": AGENT_NAME,
            "description": "Agent for creating and interacting with trading personas",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "servers": [{ "url": base_url }],
        "x-mb": {
            "account-id": config.account_id.as_deref().unwrap_or_default(),
            "assistant": {
                "name": AGENT_NAME,
                "description": AGENT_SUMMARY,
                "instructions": INSTRUCTIONS,
                "tools": [{ "type": "get-portfolio" }],
                "image": format!("{base_url}/bitte.svg"),
                "repo": REPOSITORY_URL,
                "categories": CATEGORIES,
                "chainIds": CHAIN_IDS,
            },
        },
        "paths": paths(),
    })
}

fn paths() -> Value {
    let mut paths = Map::new();

    paths.insert(
        String::from("/api/tools/create-trading-persona"),
        operation(
            "create-trading-persona",
            "Create a trading persona",
            "Saves a persona name and description and associates it with the user's address.",
            vec![
                query_param("name", "The name of the persona being created"),
                query_param("description", "The description of the persona being created"),
            ],
            json!({
                "200": ok(persona_schema()),
                "400": error_response("Bad request"),
                "500": error_response("Error response"),
            }),
        ),
    );

    paths.insert(
        String::from("/api/tools/get-persona"),
        operation(
            "get-persona",
            "Get a persona's details",
            "Get a persona's details based on the name or address the user provides.",
            Vec::new(),
            json!({ "200": ok(persona_schema()) }),
        ),
    );

    paths.insert(
        String::from("/api/tools/trending-coins"),
        operation(
            "trending-coins",
            "Get trending coins from CoinGecko",
            "Fetches the list of trending coins from CoinGecko with market cap rank, price in BTC and trending score.",
            Vec::new(),
            json!({
                "200": ok(json!({
                    "type": "object",
                    "properties": {
                        "trending_coins": {
                            "type": "array",
                            "items": trending_coin_schema(),
                        },
                    },
                })),
                "500": error_response("Error response"),
            }),
        ),
    );

    paths.insert(
        String::from("/api/tools/market-analysis"),
        operation(
            "market-analysis",
            "Get market context for the top trending coins",
            "Returns the trending symbols and, for the top three, recent social posts, social volume and hot news. Unavailable data sources show up as empty or zero values.",
            Vec::new(),
            json!({
                "200": ok(json!({
                    "type": "object",
                    "properties": {
                        "marketAnalysis": {
                            "type": "object",
                            "properties": {
                                "trendingSymbols": { "type": "array", "items": { "type": "string" } },
                                "symbolsData": { "type": "array", "items": { "type": "object" } },
                            },
                        },
                    },
                })),
                "404": error_response("No trending symbols found"),
                "500": error_response("Error response"),
            }),
        ),
    );

    paths.insert(
        String::from("/api/tools/trading-decision"),
        operation(
            "trading-decision",
            "Get a trading decision",
            "Placeholder trading decision endpoint.",
            Vec::new(),
            json!({
                "200": ok(json!({
                    "type": "object",
                    "properties": { "message": { "type": "string" } },
                })),
            }),
        ),
    );

    paths.insert(
        String::from("/api/tools/trade"),
        operation(
            "trade",
            "Makes a trade decision for a persona based on trending coins",
            "Makes a trade decision (BUY, SELL, or HOLD) for a given persona based on their description and trending coins data. If the decision is not to HOLD then you should generate a swap transaction. Use BASE as the default chain for the swap transaction.",
            vec![
                query_param(
                    "description",
                    "The description of the persona, including trading behavior and preferences.",
                ),
                query_param(
                    "personaAddress",
                    "The address of the persona making the trade decision.",
                ),
                query_param(
                    "trendingCoins",
                    "A JSON stringified array of trending coins data to inform the trade decision.",
                ),
            ],
            json!({
                "200": ok(json!({ "type": "object", "additionalProperties": true })),
                "400": error_response("Missing parameters"),
                "502": error_response("Agent runtime unreachable"),
            }),
        ),
    );

    Value::Object(paths)
}

fn operation(
    operation_id: &str,
    summary: &str,
    description: &str,
    parameters: Vec<Value>,
    responses: Value,
) -> Value {
    let mut get = json!({
        "operationId": operation_id,
        "summary": summary,
        "description": description,
        "responses": responses,
    });
    if !parameters.is_empty() {
        get["parameters"] = Value::Array(parameters);
    }
    json!({ "get": get })
}

fn query_param(name: &str, description: &str) -> Value {
    json!({
        "name": name,
        "in": "query",
        "required": true,
        "schema": { "type": "string" },
        "description": description,
    })
}

fn ok(schema: Value) -> Value {
    json!({
        "description": "Successful response",
        "content": { "application/json": { "schema": schema } },
    })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "properties": { "error": { "type": "string", "description": "Error message" } },
                },
            },
        },
    })
}

fn persona_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string", "description": "The name of the persona" },
            "description": { "type": "string", "description": "The description of the persona" },
            "personaAddress": { "type": "string", "description": "The address of the persona" },
            "userAddress": { "type": "string", "description": "The address of the user who created the persona" },
        },
    })
}

fn trending_coin_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "string" },
            "name": { "type": "string" },
            "symbol": { "type": "string" },
            "market_cap_rank": { "type": "integer", "nullable": true },
            "price_btc": { "type": "number", "nullable": true },
            "score": { "type": "integer", "nullable": true },
            "slug": { "type": "string", "nullable": true },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_uses_deployment_settings() {
        let config = AgentConfig {
            account_id: Some(String::from("captain.near")),
            public_base_url: String::from("https://agent.example/"),
            ..AgentConfig::default()
        };

        let document = descriptor(&config);

        assert_eq!(document["openapi"], "3.0.0");
        assert_eq!(document["servers"][0]["url"], "https://agent.example");
        assert_eq!(document["x-mb"]["account-id"], "captain.near");
        assert_eq!(
            document["x-mb"]["assistant"]["image"],
            "https://agent.example/bitte.svg"
        );
        assert_eq!(
            document["x-mb"]["assistant"]["chainIds"],
            json!(["near", "1", "8453"])
        );
    }

    #[test]
    fn every_tool_route_is_described() {
        let document = descriptor(&AgentConfig::default());
        let paths = document["paths"].as_object().expect("paths object");

        for route in [
            "/api/tools/create-trading-persona",
            "/api/tools/get-persona",
            "/api/tools/trending-coins",
            "/api/tools/market-analysis",
            "/api/tools/trading-decision",
            "/api/tools/trade",
        ] {
            assert!(paths.contains_key(route), "missing {route}");
        }

        let trade_params = paths["/api/tools/trade"]["get"]["parameters"]
            .as_array()
            .expect("trade parameters");
        assert_eq!(trade_params.len(), 3);
    }

    #[test]
    fn missing_account_id_renders_empty() {
        let document = descriptor(&AgentConfig::default());
        assert_eq!(document["x-mb"]["account-id"], "");
    }
}
