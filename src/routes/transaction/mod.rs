mod get;
mod post;

pub use get::{get_transaction, list_transactions};
pub use post::create_transaction;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{db_interaction::transactions::TransactionDetail, domain::{display::long_date, money::{serialize_currency, serialize_optional_currency}, PaymentMethod}};

#[derive(Serialize, Debug)]
pub struct TransactionResponse{
    pub id: Uuid,
    pub order: Uuid,
    pub table_number: i32,
    pub cashier: Option<Uuid>,
    pub cashier_name: Option<String>,
    pub payment_method: PaymentMethod,
    #[serde(serialize_with = "serialize_currency")]
    pub amount: BigDecimal,
    #[serde(serialize_with = "serialize_optional_currency")]
    pub amount_received: Option<BigDecimal>,
    #[serde(serialize_with = "serialize_optional_currency")]
    pub change_given: Option<BigDecimal>,
    pub card_last_four: Option<String>,
    pub cardholder_name: Option<String>,
    pub account_identifier: Option<String>,
    pub account_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub date: String
}

impl From<TransactionDetail> for TransactionResponse {
    fn from(detail: TransactionDetail) -> Self {
        let transaction = detail.transaction;
        TransactionResponse{
            id: transaction.transaction_id,
            order: transaction.order_id,
            table_number: detail.table_number,
            cashier: transaction.cashier_id,
            cashier_name: detail.cashier_name,
            payment_method: transaction.payment_method,
            amount: transaction.amount,
            amount_received: transaction.amount_received,
            change_given: transaction.change_given,
            card_last_four: transaction.card_last_four,
            cardholder_name: transaction.cardholder_name,
            account_identifier: transaction.account_identifier,
            account_name: transaction.account_name,
            date: long_date(transaction.created_at),
            created_at: transaction.created_at
        }
    }
}
