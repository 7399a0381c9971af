use std::sync::Arc;

use crate::aggregator::Aggregator;
use crate::assembler::{assemble, AnalysisError};
use crate::discovery::SymbolDiscovery;
use crate::MarketAnalysis;

/// Discovery, enrichment and assembly for one market-analysis request.
#[derive(Clone)]
pub struct MarketContextService {
    discovery: Arc<dyn SymbolDiscovery>,
    aggregator: Aggregator,
}

impl MarketContextService {
    pub fn new(discovery: Arc<dyn SymbolDiscovery>, aggregator: Aggregator) -> Self {
        Self {
            discovery,
            aggregator,
        }
    }

    /// Builds a fresh analysis. Provider outages show up as default
    /// contexts; only an empty symbol list is an error.
    pub async fn analyze(&self) -> Result<MarketAnalysis, AnalysisError> {
        let symbols = self.discovery.discover().await;
        let contexts = self.aggregator.aggregate(&symbols).await;

        tracing::info!(
            trending = symbols.len(),
            enriched = contexts.len(),
            "market context gathered"
        );

        assemble(symbols, contexts)
    }
}
