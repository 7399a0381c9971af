//! # Domain Models
//!
//! Request-scoped value types produced by discovery and the providers.
//! Nothing here is cached or shared across requests.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TrendingSymbol`] | Uppercase ticker from the trending list |
//! | [`SocialContext`] | Recent posts and their count |
//! | [`OnChainContext`] | Social volume and on-chain metrics |
//! | [`NewsContext`] | Hot headlines and their count |
//! | [`SymbolContext`] | All three contexts for one symbol |
//! | [`MarketAnalysis`] | Top-level response payload |
//! | [`TrendingCoin`] | Coin metadata from the trending list |

mod models;
mod symbol;

pub use models::{
    MarketAnalysis, NewsContext, NewsItem, OnChainContext, SocialContext, SocialPost,
    SymbolContext, TrendingCoin,
};
pub use symbol::TrendingSymbol;
