use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::AuthenticatedUser,
    db_interaction::orders::{get_order_with_items, get_orders_with_items, OrderFilter},
    domain::{OrderStatus, Permission},
    routes::error::ApiError,
    utils::{get_pooled_connection, page_bounds, DbPool}
};

use super::OrderResponse;

#[derive(Deserialize, Debug)]
pub struct OrderQuery{
    pub status: Option<OrderStatus>,
    pub page: Option<i64>,
    pub limit: Option<i64>
}

#[tracing::instrument(
    "Getting list of orders",
    skip(pool)
)]
pub async fn list_orders(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    query: web::Query<OrderQuery>
) -> Result<HttpResponse, ApiError>{
    user.require(Permission::HandleOrders)?;

    let query = query.into_inner();
    let (limit, offset) = page_bounds(query.page, query.limit);

    let conn = get_pooled_connection(&pool).await?;
    let orders = get_orders_with_items(
        conn,
        user.order_visibility(),
        OrderFilter{ status: query.status, limit, offset }
    )
    .await?;

    let orders: Vec<OrderResponse> = orders.into_iter()
        .map(OrderResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(orders))
}

#[tracing::instrument(
    "Getting order",
    skip(pool)
)]
pub async fn get_order(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>
) -> Result<HttpResponse, ApiError>{
    user.require(Permission::HandleOrders)?;

    let conn = get_pooled_connection(&pool).await?;
    let order = get_order_with_items(conn, path.into_inner(), user.order_visibility()).await?;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}
