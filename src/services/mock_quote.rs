use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use log::warn;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::Quote;

/// Source of synthetic quotes, used in demo mode and when the provider cannot answer.
pub trait QuoteGenerator: Send + Sync {
    fn generate(&self, symbol: &str) -> Quote;
}

/// Baseline prices for a roster of well-known tickers.
pub fn baseline_price(symbol: &str) -> Option<Decimal> {
    match symbol {
        "AAPL" => Some(dec!(178.50)),
        "GOOGL" => Some(dec!(141.25)),
        "MSFT" => Some(dec!(378.90)),
        "AMZN" => Some(dec!(178.75)),
        "TSLA" => Some(dec!(248.50)),
        "NVDA" => Some(dec!(495.22)),
        "META" => Some(dec!(505.75)),
        "VTI" => Some(dec!(268.35)),
        "VOO" => Some(dec!(492.15)),
        _ => None,
    }
}

/// Random-walk style generator around [`baseline_price`].
///
/// Unknown symbols get a baseline in `[100, 200)`; the daily change is drawn
/// from `[-5, 5)` and the percent change is always derived from it.
pub struct RandomQuoteGenerator {
    rng: Mutex<StdRng>,
}

impl Default for RandomQuoteGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomQuoteGenerator {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Same seed, same sequence of quotes.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn lock_rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|poisoned| {
            warn!("Quote generator mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl QuoteGenerator for RandomQuoteGenerator {
    fn generate(&self, symbol: &str) -> Quote {
        let symbol = symbol.trim().to_uppercase();
        let mut rng = self.lock_rng();

        let price = match baseline_price(&symbol) {
            Some(price) => price,
            None => Decimal::new(rng.random_range(10_000..20_000), 2),
        };
        let change = Decimal::new(rng.random_range(-500..500), 2);
        let change_percent = if price.is_zero() {
            Decimal::ZERO
        } else {
            (change / price * dec!(100)).round_dp(4)
        };
        let previous_close = price - change;
        let open = previous_close + Decimal::new(rng.random_range(0..200), 2);
        let high = price + Decimal::new(rng.random_range(0..500), 2);
        let low = price - Decimal::new(rng.random_range(0..500), 2);
        let volume = rng.random_range(0..10_000_000u64);

        Quote::new(
            symbol,
            price,
            change,
            change_percent,
            previous_close,
            open,
            high,
            low,
            volume,
            Utc::now().date_naive().format("%Y-%m-%d").to_string(),
        )
    }
}
