use async_trait::async_trait;

use crate::{
    error::ProviderError,
    models::{Quote, SymbolMatch},
};

/// A source of real market data.
///
/// Implementations report every failure as a [`ProviderError`]; deciding what
/// to do about it is left to the caller.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, ProviderError>;

    /// Matches in the provider's ranking order.
    async fn search_symbol(&self, query: &str) -> Result<Vec<SymbolMatch>, ProviderError>;
}
