//! Upstream adapters: one module per external API.

mod coingecko;
mod cryptopanic;
mod santiment;
mod twitter;

pub use coingecko::TrendingDiscovery;
pub use cryptopanic::CryptopanicProvider;
pub use santiment::SantimentProvider;
pub use twitter::TwitterProvider;
