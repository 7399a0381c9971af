use std::future::Future;
use std::pin::Pin;

use crate::TrendingSymbol;

/// Symbols used whenever the trending source is unusable.
pub const FALLBACK_SYMBOLS: [&str; 5] = ["BTC", "ETH", "SOL", "ADA", "DOT"];

/// Boxed future returned by [`SymbolDiscovery::discover`].
pub type DiscoveryFuture<'a> = Pin<Box<dyn Future<Output = Vec<TrendingSymbol>> + Send + 'a>>;

/// Source of the current trending symbols.
///
/// `discover` has no error channel: implementations resolve every upstream
/// fault to [`fallback_symbols`], so the returned list is never empty.
pub trait SymbolDiscovery: Send + Sync {
    fn discover<'a>(&'a self) -> DiscoveryFuture<'a>;
}

/// The fixed fallback list, in order.
pub fn fallback_symbols() -> Vec<TrendingSymbol> {
    FALLBACK_SYMBOLS
        .iter()
        .filter_map(|raw| TrendingSymbol::parse(raw).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_list_is_five_well_known_symbols() {
        let symbols: Vec<String> = fallback_symbols().into_iter().map(String::from).collect();
        assert_eq!(symbols, vec!["BTC", "ETH", "SOL", "ADA", "DOT"]);
    }
}
