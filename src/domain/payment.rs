use std::str::FromStr;

use bigdecimal::BigDecimal;
use diesel::{sql_types::Text, AsExpression, FromSqlRow};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::money::{fits_currency_column, has_sub_cent_precision, is_negative, round_currency};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod{
    Cash,
    #[serde(alias = "credit_card", alias = "debit_card")]
    Card,
    Gcash,
    Paypal,
    Paymaya
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str{
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Gcash => "gcash",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::Paymaya => "paymaya"
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "card" | "credit_card" | "debit_card" => Ok(PaymentMethod::Card),
            "gcash" => Ok(PaymentMethod::Gcash),
            "paypal" => Ok(PaymentMethod::Paypal),
            "paymaya" => Ok(PaymentMethod::Paymaya),
            other => Err(format!("{} is not a valid payment method", other))
        }
    }
}

text_sql_enum!(PaymentMethod);

#[derive(Deserialize, Debug, Clone)]
pub struct EWalletAccount{
    pub account_identifier: String,
    pub account_name: String
}

/// Method specific payment input, tagged by `payment_method`. An unknown tag
/// fails deserialization, so nothing reaches the database for it.
#[derive(Deserialize, Debug)]
#[serde(tag = "payment_method", rename_all = "lowercase")]
pub enum PaymentDetails{
    Cash{
        amount_received: BigDecimal
    },
    #[serde(alias = "credit_card", alias = "debit_card")]
    Card{
        card_number: SecretString,
        cardholder_name: String
    },
    Gcash(EWalletAccount),
    Paypal(EWalletAccount),
    Paymaya(EWalletAccount)
}

// What gets persisted for a payment, never holds a full card number
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentCapture{
    pub method: PaymentMethod,
    pub amount: BigDecimal,
    pub amount_received: Option<BigDecimal>,
    pub change_given: Option<BigDecimal>,
    pub card_last_four: Option<String>,
    pub cardholder_name: Option<String>,
    pub account_identifier: Option<String>,
    pub account_name: Option<String>
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PaymentError{
    #[error("amount received {received} is less than the amount due {due}")]
    InsufficientAmount{
        due: BigDecimal,
        received: BigDecimal
    },
    #[error("amount received cannot have more than two decimal places")]
    SubCentAmount,
    #[error("amount received cannot exceed 99999999.99")]
    AmountTooLarge,
    #[error("card number must contain between 12 and 19 digits")]
    InvalidCardNumber,
    #[error("cardholder name is required")]
    MissingCardholderName
}

impl PaymentDetails {
    pub fn method(&self) -> PaymentMethod{
        match self {
            PaymentDetails::Cash { .. } => PaymentMethod::Cash,
            PaymentDetails::Card { .. } => PaymentMethod::Card,
            PaymentDetails::Gcash(_) => PaymentMethod::Gcash,
            PaymentDetails::Paypal(_) => PaymentMethod::Paypal,
            PaymentDetails::Paymaya(_) => PaymentMethod::Paymaya
        }
    }

    // Validates the method specific fields against the amount due
    pub fn capture(self, amount_due: &BigDecimal) -> Result<PaymentCapture, PaymentError>{
        let method = self.method();
        let mut capture = PaymentCapture{
            method,
            amount: round_currency(amount_due),
            amount_received: None,
            change_given: None,
            card_last_four: None,
            cardholder_name: None,
            account_identifier: None,
            account_name: None
        };

        match self {
            PaymentDetails::Cash { amount_received } => {
                if has_sub_cent_precision(&amount_received) {
                    return Err(PaymentError::SubCentAmount)
                }
                if !fits_currency_column(&amount_received) {
                    return Err(PaymentError::AmountTooLarge)
                }

                let received = round_currency(&amount_received);
                let change = &received - &capture.amount;

                if is_negative(&change) {
                    return Err(PaymentError::InsufficientAmount{
                        due: capture.amount,
                        received
                    })
                }

                capture.amount_received = Some(received);
                capture.change_given = Some(round_currency(&change));
            },
            PaymentDetails::Card { card_number, cardholder_name } => {
                let cardholder_name = cardholder_name.trim().to_string();
                if cardholder_name.is_empty() {
                    return Err(PaymentError::MissingCardholderName)
                }

                capture.card_last_four = Some(card_last_four(&card_number)?);
                capture.cardholder_name = Some(cardholder_name);
            },
            PaymentDetails::Gcash(account)
            | PaymentDetails::Paypal(account)
            | PaymentDetails::Paymaya(account) => {
                capture.account_identifier = Some(account.account_identifier);
                capture.account_name = Some(account.account_name);
            }
        }

        Ok(capture)
    }
}

// Spaces and dashes are accepted as separators
fn card_last_four(card_number: &SecretString) -> Result<String, PaymentError>{
    let digits: Vec<char> = card_number
        .expose_secret()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if !(12..=19).contains(&digits.len()) || !digits.iter().all(char::is_ascii_digit) {
        return Err(PaymentError::InvalidCardNumber)
    }

    Ok(digits[digits.len() - 4..].iter().collect())
}
