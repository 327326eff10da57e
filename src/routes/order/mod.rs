mod delete;
mod get;
mod items;
mod post;
mod update;

pub use delete::delete_order;
pub use get::{get_order, list_orders};
pub use items::{add_order_item, delete_order_item, update_order_item};
pub use post::create_order;
pub use update::update_order;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db_interaction::orders::{OrderItemDetail, OrderLineInput, OrderWithItems},
    domain::{display::time_ago, money::serialize_currency, MenuCategory, OrderStatus}
};

#[derive(Deserialize, Serialize, Validate, Debug)]
pub struct OrderLineForm{
    pub menu_item_id: Uuid,
    #[validate(range(min = 1, max = 1000))]
    pub quantity: i32,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub special_instructions: String
}

impl From<OrderLineForm> for OrderLineInput {
    fn from(form: OrderLineForm) -> Self {
        OrderLineInput{
            menu_item_id: form.menu_item_id,
            quantity: form.quantity,
            special_instructions: form.special_instructions
        }
    }
}

#[derive(Serialize, Debug)]
pub struct OrderItemResponse{
    pub id: Uuid,
    pub menu_item: Uuid,
    pub menu_item_name: String,
    pub menu_item_category: MenuCategory,
    pub quantity: i32,
    #[serde(serialize_with = "serialize_currency")]
    pub price_at_time: BigDecimal,
    #[serde(serialize_with = "serialize_currency")]
    pub subtotal: BigDecimal,
    pub special_instructions: String
}

#[derive(Serialize, Debug)]
pub struct OrderResponse{
    pub id: Uuid,
    pub table_number: i32,
    pub waiter: Option<Uuid>,
    pub waiter_name: Option<String>,
    pub status: OrderStatus,
    #[serde(serialize_with = "serialize_currency")]
    pub subtotal: BigDecimal,
    #[serde(serialize_with = "serialize_currency")]
    pub vat: BigDecimal,
    #[serde(serialize_with = "serialize_currency")]
    pub service_fee: BigDecimal,
    #[serde(serialize_with = "serialize_currency")]
    pub total: BigDecimal,
    pub notes: String,
    pub items: Vec<OrderItemResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub time_ago: String
}

impl From<OrderItemDetail> for OrderItemResponse {
    fn from(detail: OrderItemDetail) -> Self {
        OrderItemResponse{
            id: detail.item.order_item_id,
            menu_item: detail.item.menu_item_id,
            menu_item_name: detail.menu_item_name,
            menu_item_category: detail.menu_item_category,
            quantity: detail.item.quantity,
            price_at_time: detail.item.price_at_time,
            subtotal: detail.item.subtotal,
            special_instructions: detail.item.special_instructions
        }
    }
}

impl From<OrderWithItems> for OrderResponse {
    fn from(value: OrderWithItems) -> Self {
        let order = value.order;
        OrderResponse{
            id: order.order_id,
            table_number: order.table_number,
            waiter: order.waiter_id,
            waiter_name: value.waiter_name,
            status: order.status,
            subtotal: order.subtotal,
            vat: order.vat,
            service_fee: order.service_fee,
            total: order.total,
            notes: order.notes,
            items: value.items.into_iter().map(OrderItemResponse::from).collect(),
            created_at: order.created_at,
            updated_at: order.updated_at,
            time_ago: time_ago(order.created_at, Utc::now())
        }
    }
}
