use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Holding, PortfolioSummary, PricedHolding, Quote};

/// Values a holding at its quote, or at its purchase price when there is none.
pub fn price_holding(holding: &Holding, quote: Option<&Quote>) -> Result<PricedHolding> {
    let symbol = holding.symbol();
    let quantity = *holding.quantity();
    let current_price = quote.map_or(*holding.purchase_price(), |q| *q.price());

    let current_value = checked(current_price.checked_mul(quantity), "value", symbol)?;
    let cost_basis = cost_basis(holding)?;
    let total_gain = checked(current_value.checked_sub(cost_basis), "gain", symbol)?;
    let total_gain_percent = percent_of(total_gain, cost_basis)
        .with_context(|| format!("Gain percent overflows for {}", symbol))?;
    let day_change = checked(
        quote
            .map_or(Decimal::ZERO, |q| *q.change())
            .checked_mul(quantity),
        "day change",
        symbol,
    )?;
    let day_change_percent = quote.map_or(Decimal::ZERO, |q| *q.change_percent());

    Ok(PricedHolding::new(
        holding.clone(),
        current_price,
        current_value,
        cost_basis,
        total_gain,
        total_gain_percent,
        day_change,
        day_change_percent,
    ))
}

pub fn cost_basis(holding: &Holding) -> Result<Decimal> {
    checked(
        holding.purchase_price().checked_mul(*holding.quantity()),
        "cost basis",
        holding.symbol(),
    )
}

pub fn summarize(priced: &[PricedHolding]) -> Result<PortfolioSummary> {
    let total_value = sum(priced.iter().map(|p| *p.current_value()), "total value")?;
    let total_cost = sum(priced.iter().map(|p| *p.cost_basis()), "total cost")?;
    let total_gain = total_value
        .checked_sub(total_cost)
        .context("Total gain overflows")?;
    let day_change = sum(priced.iter().map(|p| *p.day_change()), "day change")?;

    // Day change is measured against yesterday's value.
    let day_change_percent = if total_value > Decimal::ZERO {
        let previous_value = total_value
            .checked_sub(day_change)
            .context("Previous value overflows")?;
        percent_of(day_change, previous_value).context("Day change percent overflows")?
    } else {
        Decimal::ZERO
    };

    Ok(PortfolioSummary::new(
        total_value,
        total_cost,
        total_gain,
        percent_of(total_gain, total_cost).context("Gain percent overflows")?,
        day_change,
        day_change_percent,
    ))
}

fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole > Decimal::ZERO {
        part.checked_div(whole)?.checked_mul(dec!(100))
    } else {
        Some(Decimal::ZERO)
    }
}

fn sum(mut values: impl Iterator<Item = Decimal>, what: &str) -> Result<Decimal> {
    values
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .with_context(|| format!("Portfolio {} overflows", what))
}

fn checked(value: Option<Decimal>, what: &str, symbol: &str) -> Result<Decimal> {
    value.with_context(|| format!("{} overflows for {}", what, symbol))
}
