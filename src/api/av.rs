use async_trait::async_trait;
use log::{error, warn};
use reqwest::Client;
use serde_json::Value;
use strum_macros::AsRefStr;

use super::{
    av_dto::{AvGlobalQuoteDto, AvStatusDto, AvSymbolSearchDto},
    provider::QuoteProvider,
    utils::{make_request, parse_response_array, parse_response_object},
};
use crate::{
    config::Config,
    error::ProviderError,
    models::{Quote, SymbolMatch},
};

const ENDPOINT: &str = "query";

#[derive(AsRefStr, Clone, Copy, Debug)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
enum AvFunction {
    GlobalQuote,
    SymbolSearch,
}

#[derive(Clone, Debug)]
pub struct AlphaVantageClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageClient {
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(*config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            api_key: config.api_key().clone(),
        })
    }

    async fn call(&self, function: AvFunction, params: &[(&str, &str)]) -> Result<Value, ProviderError> {
        let mut query = vec![("function", function.as_ref())];
        query.extend_from_slice(params);
        query.push(("apikey", self.api_key.as_str()));

        make_request(&self.client, &self.base_url, ENDPOINT, &query).await
    }
}

#[async_trait]
impl QuoteProvider for AlphaVantageClient {
    fn name(&self) -> &'static str {
        "Alpha Vantage"
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, ProviderError> {
        let result = match self.call(AvFunction::GlobalQuote, &[("symbol", symbol)]).await {
            Ok(res) => parse_global_quote(res, symbol),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            log_failure(self.name(), symbol, e);
        }
        result
    }

    async fn search_symbol(&self, query: &str) -> Result<Vec<SymbolMatch>, ProviderError> {
        let result = match self.call(AvFunction::SymbolSearch, &[("keywords", query)]).await {
            Ok(res) => parse_symbol_search(res, query),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            log_failure(self.name(), query, e);
        }
        result
    }
}

/// Turns a decoded GLOBAL_QUOTE body into a quote, classifying the failure shapes.
pub fn parse_global_quote(res: Value, symbol: &str) -> Result<Quote, ProviderError> {
    check_status(&res)?;

    let global_quote = res
        .get("Global Quote")
        .cloned()
        .ok_or_else(|| ProviderError::Malformed(format!("no 'Global Quote' for {}", symbol)))?;

    parse_response_object::<AvGlobalQuoteDto>(
        global_quote,
        &format!("No quote data for symbol {}", symbol),
    )?
    .to_quote(symbol)
}

pub fn parse_symbol_search(res: Value, query: &str) -> Result<Vec<SymbolMatch>, ProviderError> {
    check_status(&res)?;

    let best_matches = res
        .get("bestMatches")
        .cloned()
        .ok_or_else(|| ProviderError::Malformed(format!("no 'bestMatches' for '{}'", query)))?;

    Ok(parse_response_array::<AvSymbolSearchDto>(
        best_matches,
        &format!("No results for query {}", query),
    )?
    .iter()
    .map(AvSymbolSearchDto::to_symbol_match)
    .collect())
}

fn check_status(res: &Value) -> Result<(), ProviderError> {
    let status = serde_json::from_value::<AvStatusDto>(res.clone()).unwrap_or_default();
    match status.into_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn log_failure(provider: &str, subject: &str, e: &ProviderError) {
    if e.is_soft_failure() {
        warn!("{} limit or error for '{}': {}", provider, subject, e);
    } else {
        error!("{} request for '{}' failed: {}", provider, subject, e);
    }
}
