use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot of a ticker's trading data, either fetched from the provider or synthesized.
#[derive(Clone, Debug, Deserialize, Eq, Getters, PartialEq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    symbol: String,
    price: Decimal,
    change: Decimal,
    change_percent: Decimal,
    previous_close: Decimal,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    volume: u64,
    latest_trading_day: String,
}
