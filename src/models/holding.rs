use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Eq, Getters, PartialEq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    symbol: String,
    name: String,
    quantity: Decimal,
    purchase_price: Decimal,
    purchase_date: NaiveDate,
}

/// A holding valued against its latest quote.
#[derive(Clone, Debug, Getters, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct PricedHolding {
    holding: Holding,
    current_price: Decimal,
    current_value: Decimal,
    cost_basis: Decimal,
    total_gain: Decimal,
    total_gain_percent: Decimal,
    day_change: Decimal,
    day_change_percent: Decimal,
}
