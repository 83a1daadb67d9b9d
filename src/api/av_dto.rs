use std::str::FromStr;

use derive_getters::Getters;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    error::ProviderError,
    models::{Quote, SymbolMatch},
};

/// Markers the provider puts in an otherwise successful body instead of data.
#[derive(Debug, Default, Deserialize)]
pub struct AvStatusDto {
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

impl AvStatusDto {
    pub fn into_error(self) -> Option<ProviderError> {
        if let Some(message) = self.note.or(self.information) {
            return Some(ProviderError::QuotaExceeded(message));
        }
        self.error_message.map(ProviderError::Api)
    }
}

#[derive(Debug, Deserialize, Getters)]
pub struct AvGlobalQuoteDto {
    #[serde(rename = "01. symbol", default)]
    symbol: Option<String>,
    #[serde(rename = "02. open")]
    open: String,
    #[serde(rename = "03. high")]
    high: String,
    #[serde(rename = "04. low")]
    low: String,
    #[serde(rename = "05. price")]
    price: String,
    #[serde(rename = "06. volume")]
    volume: String,
    #[serde(rename = "07. latest trading day")]
    latest_trading_day: String,
    #[serde(rename = "08. previous close")]
    previous_close: String,
    #[serde(rename = "09. change")]
    change: String,
    #[serde(rename = "10. change percent")]
    change_percent: String,
}

impl AvGlobalQuoteDto {
    pub fn to_quote(&self, requested_symbol: &str) -> Result<Quote, ProviderError> {
        let symbol = self
            .symbol
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(requested_symbol)
            .trim()
            .to_uppercase();

        let volume = self.volume.trim().parse::<u64>().map_err(|e| {
            ProviderError::Malformed(format!("volume '{}' for {}: {}", self.volume, symbol, e))
        })?;

        Ok(Quote::new(
            symbol.clone(),
            parse_decimal(&self.price, "price", &symbol)?,
            parse_decimal(&self.change, "change", &symbol)?,
            parse_decimal(
                self.change_percent.trim().trim_end_matches('%'),
                "change percent",
                &symbol,
            )?,
            parse_decimal(&self.previous_close, "previous close", &symbol)?,
            parse_decimal(&self.open, "open", &symbol)?,
            parse_decimal(&self.high, "high", &symbol)?,
            parse_decimal(&self.low, "low", &symbol)?,
            volume,
            self.latest_trading_day.trim().to_string(),
        ))
    }
}

#[derive(Debug, Deserialize, Getters)]
pub struct AvSymbolSearchDto {
    #[serde(rename = "1. symbol")]
    symbol: String,
    #[serde(rename = "2. name")]
    name: String,
}

impl AvSymbolSearchDto {
    pub fn to_symbol_match(&self) -> SymbolMatch {
        SymbolMatch::new(self.symbol.clone(), self.name.clone())
    }
}

fn parse_decimal(field: &str, field_name: &str, symbol: &str) -> Result<Decimal, ProviderError> {
    Decimal::from_str(field.trim()).map_err(|e| {
        ProviderError::Malformed(format!(
            "{} '{}' for {}: {}",
            field_name, field, symbol, e
        ))
    })
}
