use std::collections::HashMap;

use anyhow::{Context, Error, Result};
use csv::Reader;
use log::{info, warn};

use super::{
    calc::{cost_basis, price_holding, summarize},
    utils::{parse_date, parse_decimal},
};
use crate::{
    models::{Holding, PortfolioSummary, PricedHolding, Quote},
    services::{QuoteService, quote_service::normalize_symbol},
};

const COLUMNS: usize = 5;

#[derive(Clone, Debug, Default)]
pub struct Portfolio {
    holdings: Vec<Holding>,
    quotes: HashMap<String, Quote>,
}

impl Portfolio {
    pub fn new(holdings: Vec<Holding>) -> Self {
        Self {
            holdings,
            quotes: HashMap::new(),
        }
    }

    /// Reads `symbol,name,quantity,purchase_price,purchase_date` rows.
    pub fn import_holdings(path: &str) -> Result<Self> {
        let path = shellexpand::tilde(path);
        let mut reader = Reader::from_path(&*path)
            .with_context(|| format!("Failed to open CSV file at path: {}", path))?;

        let mut holdings = Vec::new();

        for (row_idx, record) in reader.records().enumerate() {
            let row = row_idx + 1;
            let rec = record.with_context(|| format!("Failed to read CSV record at row {}", row))?;

            if rec.len() < COLUMNS {
                return Err(Error::msg(format!(
                    "Invalid CSV format at row {}: expected {} columns, found {}",
                    row,
                    COLUMNS,
                    rec.len()
                )));
            }

            let symbol = normalize_symbol(&rec[0]);
            if symbol.is_empty() {
                warn!("Skipping row {} without a symbol", row);
                continue;
            }

            let quantity =
                parse_decimal(&rec[2], "quantity").with_context(|| format!("Row {}", row))?;
            let purchase_price =
                parse_decimal(&rec[3], "purchase price").with_context(|| format!("Row {}", row))?;
            let purchase_date = parse_date(&rec[4]).with_context(|| format!("Row {}", row))?;

            let holding = Holding::new(
                symbol,
                rec[1].trim().to_string(),
                quantity,
                purchase_price,
                purchase_date,
            );
            cost_basis(&holding).with_context(|| format!("Row {}", row))?;

            holdings.push(holding);
        }

        info!("Imported {} holdings", holdings.len());

        Ok(Self::new(holdings))
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn quotes(&self) -> &HashMap<String, Quote> {
        &self.quotes
    }

    pub fn symbols(&self) -> Vec<String> {
        self.holdings.iter().map(|h| h.symbol().clone()).collect()
    }

    pub async fn refresh_prices(&mut self, service: &QuoteService, use_mock: bool) {
        self.quotes = service.get_quotes(&self.symbols(), use_mock).await;
    }

    pub fn priced_holdings(&self) -> Result<Vec<PricedHolding>> {
        self.holdings
            .iter()
            .map(|holding| price_holding(holding, self.quotes.get(holding.symbol())))
            .collect()
    }

    pub fn summary(&self) -> Result<PortfolioSummary> {
        summarize(&self.priced_holdings()?)
    }
}
