use bigdecimal::{BigDecimal, RoundingMode};
use serde::Serializer;

// Currency precision used for every persisted amount
pub const CURRENCY_SCALE: i64 = 2;

// Largest value a NUMERIC(10,2) column holds, in cents
const MAX_AMOUNT_CENTS: i64 = 9_999_999_999;

pub fn zero() -> BigDecimal{
    BigDecimal::new(0.into(), CURRENCY_SCALE)
}

pub fn max_amount() -> BigDecimal{
    BigDecimal::new(MAX_AMOUNT_CENTS.into(), CURRENCY_SCALE)
}

pub fn fits_currency_column(amount: &BigDecimal) -> bool{
    *amount <= max_amount()
}

// True when the amount carries fractions of a cent
pub fn has_sub_cent_precision(amount: &BigDecimal) -> bool{
    round_currency(amount) != *amount
}

// `percent(12)` is 0.12
pub fn percent(value: i64) -> BigDecimal{
    BigDecimal::new(value.into(), 2)
}

pub fn round_currency(amount: &BigDecimal) -> BigDecimal{
    amount.with_scale_round(CURRENCY_SCALE, RoundingMode::HalfUp)
}

pub fn is_negative(amount: &BigDecimal) -> bool{
    *amount < zero()
}

// Fixed two decimal rendering. Scale is not trusted here since zero read back
// from NUMERIC, or rounded, can lose its trailing digits.
pub fn format_currency(amount: &BigDecimal) -> String{
    let cents = (round_currency(amount) * BigDecimal::from(100)).with_scale(0).to_string();
    let (sign, digits) = match cents.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", cents.as_str())
    };
    let digits = format!("{:0>3}", digits);
    let (whole, fraction) = digits.split_at(digits.len() - 2);
    format!("{}{}.{}", sign, whole, fraction)
}

pub fn serialize_currency<S>(amount: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer
{
    serializer.serialize_str(&format_currency(amount))
}

pub fn serialize_optional_currency<S>(amount: &Option<BigDecimal>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer
{
    match amount {
        Some(amount) => serializer.serialize_str(&format_currency(amount)),
        None => serializer.serialize_none()
    }
}
