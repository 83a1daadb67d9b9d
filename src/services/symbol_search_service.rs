use std::{sync::Arc, time::Duration};

use log::warn;

use crate::{api::QuoteProvider, config::Config, models::SymbolMatch};

pub const MAX_MATCHES: usize = 5;

pub struct SymbolSearchService {
    provider: Arc<dyn QuoteProvider>,
    request_timeout: Duration,
}

impl SymbolSearchService {
    pub fn new(provider: Arc<dyn QuoteProvider>, config: &Config) -> Self {
        Self {
            provider,
            request_timeout: *config.request_timeout(),
        }
    }

    /// Best matches for `query`, empty when the provider has nothing usable.
    pub async fn search(&self, query: &str) -> Vec<SymbolMatch> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        match tokio::time::timeout(self.request_timeout, self.provider.search_symbol(query)).await
        {
            Ok(Ok(mut matches)) => {
                matches.truncate(MAX_MATCHES);
                matches
            }
            Ok(Err(e)) => {
                warn!("Symbol search for '{}' failed: {}", query, e);
                Vec::new()
            }
            Err(_) => {
                warn!(
                    "Symbol search for '{}' timed out after {:?}",
                    query, self.request_timeout
                );
                Vec::new()
            }
        }
    }
}
