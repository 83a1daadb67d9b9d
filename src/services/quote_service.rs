use std::{collections::HashMap, sync::Arc, time::Duration};

use log::{debug, info, warn};
use tokio::sync::Mutex;

use super::{
    mock_quote::{QuoteGenerator, RandomQuoteGenerator},
    quote_cache::QuoteCache,
};
use crate::{api::QuoteProvider, config::Config, error::ProviderError, models::Quote};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum QuoteSource {
    Mock,
    Cache,
    Provider,
    Fallback,
}

impl QuoteSource {
    /// Whether resolving the quote cost a provider call.
    fn called_provider(self) -> bool {
        matches!(self, Self::Provider | Self::Fallback)
    }
}

/// Resolves quotes from the cache, then the provider, then synthetic data.
/// Callers always get a quote back.
pub struct QuoteService {
    provider: Arc<dyn QuoteProvider>,
    generator: Arc<dyn QuoteGenerator>,
    cache: QuoteCache,
    pacing_delay: Duration,
    request_timeout: Duration,
    // One provider call at a time across every batch served by this instance.
    provider_gate: Mutex<()>,
}

impl QuoteService {
    pub fn new(provider: Arc<dyn QuoteProvider>, config: &Config) -> Self {
        Self {
            provider,
            generator: Arc::new(RandomQuoteGenerator::new()),
            cache: QuoteCache::new(*config.cache_ttl()),
            pacing_delay: *config.pacing_delay(),
            request_timeout: *config.request_timeout(),
            provider_gate: Mutex::new(()),
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn QuoteGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn cache(&self) -> &QuoteCache {
        &self.cache
    }

    pub async fn get_quote(&self, symbol: &str, use_mock: bool) -> Quote {
        let symbol = normalize_symbol(symbol);
        self.resolve(&symbol, use_mock).await.0
    }

    /// Resolves every unique symbol in order, one provider call at a time.
    ///
    /// The result holds an entry for each normalised symbol requested.
    pub async fn get_quotes<S: AsRef<str>>(
        &self,
        symbols: &[S],
        use_mock: bool,
    ) -> HashMap<String, Quote> {
        let symbols = normalize_symbols(symbols);
        let mut quotes = HashMap::with_capacity(symbols.len());

        for (idx, symbol) in symbols.iter().enumerate() {
            let (quote, source) = self.resolve(symbol, use_mock).await;
            quotes.insert(symbol.clone(), quote);

            if source.called_provider() && idx + 1 < symbols.len() {
                tokio::time::sleep(self.pacing_delay).await;
            }
        }

        quotes
    }

    async fn resolve(&self, symbol: &str, use_mock: bool) -> (Quote, QuoteSource) {
        if use_mock {
            return (self.generator.generate(symbol), QuoteSource::Mock);
        }

        if let Some(quote) = self.cache.get(symbol) {
            debug!("Serving {} from cache", symbol);
            return (quote, QuoteSource::Cache);
        }

        let _gate = self.provider_gate.lock().await;

        // Another batch may have fetched it while we waited for the gate.
        if let Some(quote) = self.cache.get(symbol) {
            return (quote, QuoteSource::Cache);
        }

        match self.fetch(symbol).await {
            Ok(quote) => {
                self.cache.put(symbol, quote.clone());
                (quote, QuoteSource::Provider)
            }
            Err(e) => {
                info!("Using synthetic quote for {}: {}", symbol, e);
                (self.generator.generate(symbol), QuoteSource::Fallback)
            }
        }
    }

    async fn fetch(&self, symbol: &str) -> Result<Quote, ProviderError> {
        match tokio::time::timeout(self.request_timeout, self.provider.fetch_quote(symbol)).await
        {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    "{} did not answer for {} within {:?}",
                    self.provider.name(),
                    symbol,
                    self.request_timeout
                );
                Err(ProviderError::Timeout(self.request_timeout))
            }
        }
    }
}

pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// Trims, uppercases and de-duplicates, keeping first-occurrence order.
pub fn normalize_symbols<S: AsRef<str>>(symbols: &[S]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(symbols.len());

    for symbol in symbols {
        let symbol = normalize_symbol(symbol.as_ref());
        if !symbol.is_empty() && !unique.contains(&symbol) {
            unique.push(symbol);
        }
    }

    unique
}
