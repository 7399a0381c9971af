use std::sync::Arc;

use persona_core::{AgentConfig, AgentServices, MarketContextBuilder};

/// Shared state for all handlers
pub struct AppState {
    pub config: AgentConfig,
    pub services: AgentServices,
}

impl AppState {
    pub fn new(config: AgentConfig, services: AgentServices) -> Arc<Self> {
        Arc::new(Self { config, services })
    }

    /// Wires production services (reqwest transport) for `config`.
    pub fn from_config(config: AgentConfig) -> Arc<Self> {
        let services = MarketContextBuilder::new(&config).build();
        Self::new(config, services)
    }
}
