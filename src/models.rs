use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::{AsChangeset, Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{money::serialize_currency, MenuCategory, OrderStatus, PaymentMethod, Role};
use crate::schema::{menu_items, order_items, orders, transactions, users};

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, Clone)]
#[diesel(table_name = users, primary_key(user_id), check_for_backend(Pg))]
pub struct User{
    pub user_id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>
}

#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = users)]
pub struct UserChanges{
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub phone_number: Option<Option<String>>,
    pub role: Option<Role>,
    pub password_hash: Option<String>,
    pub updated_at: Option<DateTime<Utc>>
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Serialize, Debug, Clone)]
#[diesel(table_name = menu_items, primary_key(menu_item_id), check_for_backend(Pg))]
pub struct MenuItem{
    #[serde(rename = "id")]
    pub menu_item_id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(serialize_with = "serialize_currency")]
    pub price: BigDecimal,
    pub category: MenuCategory,
    pub available: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>
}

#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = menu_items)]
pub struct MenuItemChanges{
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub category: Option<MenuCategory>,
    pub available: Option<bool>,
    pub image_url: Option<Option<String>>,
    pub updated_at: Option<DateTime<Utc>>
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, Clone)]
#[diesel(table_name = orders, primary_key(order_id), check_for_backend(Pg))]
pub struct Order{
    pub order_id: Uuid,
    pub table_number: i32,
    pub waiter_id: Option<Uuid>,
    pub status: OrderStatus,
    pub subtotal: BigDecimal,
    pub vat: BigDecimal,
    pub service_fee: BigDecimal,
    pub total: BigDecimal,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>
}

#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = orders)]
pub struct OrderChanges{
    pub table_number: Option<i32>,
    pub status: Option<OrderStatus>,
    pub notes: Option<String>,
    pub updated_at: Option<DateTime<Utc>>
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(
    table_name = order_items,
    primary_key(order_item_id),
    belongs_to(Order, foreign_key = order_id),
    check_for_backend(Pg)
)]
pub struct OrderItem{
    pub order_item_id: Uuid,
    pub order_id: Uuid,
    pub menu_item_id: Uuid,
    pub quantity: i32,
    pub price_at_time: BigDecimal,
    pub subtotal: BigDecimal,
    pub special_instructions: String,
    pub position: i64,
    pub created_at: DateTime<Utc>
}

// `position` is assigned by the database
#[derive(Insertable, Debug)]
#[diesel(table_name = order_items)]
pub struct NewOrderItem{
    pub order_item_id: Uuid,
    pub order_id: Uuid,
    pub menu_item_id: Uuid,
    pub quantity: i32,
    pub price_at_time: BigDecimal,
    pub subtotal: BigDecimal,
    pub special_instructions: String,
    pub created_at: DateTime<Utc>
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, Clone)]
#[diesel(table_name = transactions, primary_key(transaction_id), check_for_backend(Pg))]
pub struct Transaction{
    pub transaction_id: Uuid,
    pub order_id: Uuid,
    pub cashier_id: Option<Uuid>,
    pub payment_method: PaymentMethod,
    pub amount: BigDecimal,
    pub amount_received: Option<BigDecimal>,
    pub change_given: Option<BigDecimal>,
    pub card_last_four: Option<String>,
    pub cardholder_name: Option<String>,
    pub account_identifier: Option<String>,
    pub account_name: Option<String>,
    pub created_at: DateTime<Utc>
}

#[derive(AsChangeset, Debug)]
#[diesel(table_name = order_items)]
pub struct OrderItemChanges{
    pub quantity: Option<i32>,
    pub subtotal: BigDecimal,
    pub special_instructions: Option<String>
}
