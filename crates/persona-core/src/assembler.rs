use thiserror::Error;

use crate::aggregator::MAX_ENRICHED_SYMBOLS;
use crate::{MarketAnalysis, SymbolContext, TrendingSymbol};

/// The only failures surfaced by a market-analysis request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("No trending symbols found")]
    NoTrendingSymbols,

    #[error("Failed to gather market analysis data: {0}")]
    Internal(String),
}

impl AnalysisError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NoTrendingSymbols => "analysis.no_trending_symbols",
            Self::Internal(_) => "analysis.internal",
        }
    }
}

/// Wraps discovered symbols and their contexts into the response payload.
///
/// Contexts must line up 1:1 with the leading symbols; anything else is an
/// internal fault, not a provider failure.
pub fn assemble(
    symbols: Vec<TrendingSymbol>,
    contexts: Vec<SymbolContext>,
) -> Result<MarketAnalysis, AnalysisError> {
    if symbols.is_empty() {
        return Err(AnalysisError::NoTrendingSymbols);
    }

    let expected = symbols.len().min(MAX_ENRICHED_SYMBOLS);
    if contexts.len() != expected {
        return Err(AnalysisError::Internal(format!(
            "expected {expected} symbol contexts, got {}",
            contexts.len()
        )));
    }

    if let Some((position, context)) = contexts
        .iter()
        .enumerate()
        .find(|(position, context)| context.symbol != symbols[*position])
    {
        return Err(AnalysisError::Internal(format!(
            "context for {} does not match symbol {} at position {position}",
            context.symbol, symbols[position]
        )));
    }

    Ok(MarketAnalysis {
        trending_symbols: symbols,
        symbols_data: contexts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(raw: &[&str]) -> Vec<TrendingSymbol> {
        raw.iter()
            .map(|value| TrendingSymbol::parse(value).expect("valid symbol"))
            .collect()
    }

    fn defaults(raw: &[&str]) -> Vec<SymbolContext> {
        symbols(raw).into_iter().map(SymbolContext::defaults_for).collect()
    }

    #[test]
    fn empty_symbols_is_not_found() {
        let error = assemble(Vec::new(), Vec::new()).expect_err("no symbols");
        assert_eq!(error, AnalysisError::NoTrendingSymbols);
        assert_eq!(error.to_string(), "No trending symbols found");
    }

    #[test]
    fn keeps_every_symbol_while_only_the_leading_ones_carry_contexts() {
        let analysis = assemble(
            symbols(&["BTC", "ETH", "SOL", "ADA"]),
            defaults(&["BTC", "ETH", "SOL"]),
        )
        .expect("assembles");

        assert_eq!(analysis.trending_symbols.len(), 4);
        assert_eq!(analysis.symbols_data.len(), 3);
    }

    #[test]
    fn mismatched_contexts_are_internal_errors() {
        let short = assemble(symbols(&["BTC", "ETH"]), defaults(&["BTC"])).expect_err("short");
        assert_eq!(short.code(), "analysis.internal");

        let reordered =
            assemble(symbols(&["BTC", "ETH"]), defaults(&["ETH", "BTC"])).expect_err("reordered");
        assert!(reordered.to_string().contains("position 0"));
    }
}
