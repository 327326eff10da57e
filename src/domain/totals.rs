use bigdecimal::BigDecimal;
use serde::Serialize;

use super::money::{percent, round_currency, serialize_currency, zero};

pub const VAT_PERCENT: i64 = 12;
pub const SERVICE_FEE_PERCENT: i64 = 10;

// Derived amounts stored on an order row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderTotals{
    #[serde(serialize_with = "serialize_currency")]
    pub subtotal: BigDecimal,
    #[serde(serialize_with = "serialize_currency")]
    pub vat: BigDecimal,
    #[serde(serialize_with = "serialize_currency")]
    pub service_fee: BigDecimal,
    #[serde(serialize_with = "serialize_currency")]
    pub total: BigDecimal
}

impl OrderTotals {
    pub fn zero() -> Self{
        Self::from_subtotal(zero())
    }

    // vat and service fee are each rounded before being added to the total
    pub fn from_subtotal(subtotal: BigDecimal) -> Self{
        let subtotal = round_currency(&subtotal);
        let vat = round_currency(&(&subtotal * percent(VAT_PERCENT)));
        let service_fee = round_currency(&(&subtotal * percent(SERVICE_FEE_PERCENT)));
        let total = round_currency(&(&subtotal + &vat + &service_fee));

        OrderTotals{
            subtotal,
            vat,
            service_fee,
            total
        }
    }
}

// price snapshot x quantity, rounded to currency precision
pub fn line_subtotal(price_at_time: &BigDecimal, quantity: i32) -> BigDecimal{
    round_currency(&(price_at_time * BigDecimal::from(quantity)))
}

/// Recomputes an order's totals from the (price snapshot, quantity) pairs of
/// its current line items. Every term is rounded before summation so that the
/// result is identical whether it is computed once at creation or after any
/// later item mutation.
pub fn compute_totals<'a, I>(items: I) -> OrderTotals
where
    I: IntoIterator<Item = (&'a BigDecimal, i32)>
{
    let subtotal = items
        .into_iter()
        .map(|(price, quantity)| line_subtotal(price, quantity))
        .fold(zero(), |acc, line| acc + line);

    OrderTotals::from_subtotal(subtotal)
}
