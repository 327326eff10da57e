use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::AuthenticatedUser,
    db_interaction::orders::OrderItemUpdate,
    domain::Permission,
    routes::error::ApiError,
    utils::{get_pooled_connection, DbPool}
};

use super::{OrderLineForm, OrderResponse};

#[derive(Deserialize, Validate, Debug)]
pub struct UpdateOrderItemForm{
    #[validate(range(min = 1, max = 1000))]
    pub quantity: Option<i32>,
    #[validate(length(max = 500))]
    pub special_instructions: Option<String>
}

// Every line mutation answers with the whole order so clients see fresh totals
#[tracing::instrument(
    "Adding item to order",
    skip(pool)
)]
pub async fn add_order_item(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    form: web::Json<OrderLineForm>
) -> Result<HttpResponse, ApiError>{
    user.require(Permission::HandleOrders)?;

    let form = form.into_inner();
    form.validate()?;

    let conn = get_pooled_connection(&pool).await?;
    let order = crate::db_interaction::orders::add_order_item(
        conn,
        path.into_inner(),
        user.order_visibility(),
        form.into()
    )
    .await?;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

#[tracing::instrument(
    "Updating order item",
    skip(pool)
)]
pub async fn update_order_item(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    path: web::Path<(Uuid, Uuid)>,
    form: web::Json<UpdateOrderItemForm>
) -> Result<HttpResponse, ApiError>{
    user.require(Permission::HandleOrders)?;

    let form = form.into_inner();
    form.validate()?;

    let (order_id, order_item_id) = path.into_inner();
    let conn = get_pooled_connection(&pool).await?;
    let order = crate::db_interaction::orders::update_order_item(
        conn,
        order_id,
        order_item_id,
        user.order_visibility(),
        OrderItemUpdate{
            quantity: form.quantity,
            special_instructions: form.special_instructions
        }
    )
    .await?;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

#[tracing::instrument(
    "Removing item from order",
    skip(pool)
)]
pub async fn delete_order_item(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    path: web::Path<(Uuid, Uuid)>
) -> Result<HttpResponse, ApiError>{
    user.require(Permission::HandleOrders)?;

    let (order_id, order_item_id) = path.into_inner();
    let conn = get_pooled_connection(&pool).await?;
    let order = crate::db_interaction::orders::delete_order_item(
        conn,
        order_id,
        order_item_id,
        user.order_visibility()
    )
    .await?;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}
