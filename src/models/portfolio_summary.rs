use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Clone, Debug, Eq, Getters, PartialEq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    total_value: Decimal,
    total_cost: Decimal,
    total_gain: Decimal,
    total_gain_percent: Decimal,
    day_change: Decimal,
    day_change_percent: Decimal,
}
