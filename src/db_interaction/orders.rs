use std::{collections::HashMap, error::Error, fmt::Debug};

use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::result::Error as DieselError;
use diesel::{Connection, ExpressionMethods, JoinOnDsl, NullableExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl, SelectableHelper};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    domain::{money::fits_currency_column, totals::{compute_totals, line_subtotal}, MenuCategory, OrderStatus, OrderTotals, OrderVisibility},
    models::{MenuItem, NewOrderItem, Order, OrderChanges, OrderItem, OrderItemChanges},
    schema::{menu_items, order_items, orders, users},
    telemetry::spawn_blocking_with_tracing,
    utils::{error_fmt_chain, DbConnection}
};

// One requested line of a new order
#[derive(Debug, Clone)]
pub struct OrderLineInput{
    pub menu_item_id: Uuid,
    pub quantity: i32,
    pub special_instructions: String
}

#[derive(Debug, Clone)]
pub struct NewOrder{
    pub waiter_id: Uuid,
    pub table_number: i32,
    pub notes: String,
    pub lines: Vec<OrderLineInput>
}

#[derive(Debug, Default)]
pub struct OrderItemUpdate{
    pub quantity: Option<i32>,
    pub special_instructions: Option<String>
}

#[derive(Debug, Clone)]
pub struct OrderItemDetail{
    pub item: OrderItem,
    pub menu_item_name: String,
    pub menu_item_category: MenuCategory
}

// An order header hydrated with its lines in insertion order
#[derive(Debug, Clone)]
pub struct OrderWithItems{
    pub order: Order,
    pub waiter_name: Option<String>,
    pub items: Vec<OrderItemDetail>
}

#[derive(Debug, Default, Clone)]
pub struct OrderFilter{
    pub status: Option<OrderStatus>,
    pub limit: i64,
    pub offset: i64
}

#[derive(Error)]
pub enum OrderError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] DieselError),
    #[error("order {0} doesn't exist")]
    NoOrderIdError(Uuid),
    #[error("order item {0} doesn't exist on this order")]
    NoOrderItemError(Uuid),
    #[error("menu item {0} doesn't exist")]
    NoMenuItemError(Uuid),
    #[error("menu item {0} is currently unavailable")]
    MenuItemUnavailable(Uuid),
    #[error("order amounts cannot exceed 99999999.99")]
    AmountOutOfRange,
    #[error("order {order_id} is {status} and can no longer be changed")]
    TerminalOrder{
        order_id: Uuid,
        status: OrderStatus
    }
}

impl Debug for OrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

fn is_visible(order: &Order, visibility: OrderVisibility) -> bool{
    match visibility {
        OrderVisibility::All => true,
        OrderVisibility::OwnedBy(user_id) => order.waiter_id == Some(user_id)
    }
}

// Locks the order row for the rest of the surrounding transaction
pub fn lock_order(
    conn: &mut DbConnection,
    order_id: Uuid,
    visibility: OrderVisibility
) -> Result<Order, OrderError>{
    orders::table
        .find(order_id)
        .select(Order::as_select())
        .for_update()
        .get_result::<Order>(conn)
        .optional()?
        .filter(|order| is_visible(order, visibility))
        .ok_or(OrderError::NoOrderIdError(order_id))
}

// Line subtotals and order totals live in NUMERIC(10,2) columns
fn checked_line_subtotal(price_at_time: &BigDecimal, quantity: i32) -> Result<BigDecimal, OrderError>{
    let subtotal = line_subtotal(price_at_time, quantity);
    if !fits_currency_column(&subtotal) {
        return Err(OrderError::AmountOutOfRange)
    }
    Ok(subtotal)
}

fn ensure_mutable(order: &Order) -> Result<(), OrderError>{
    if order.status.is_terminal() {
        return Err(OrderError::TerminalOrder{
            order_id: order.order_id,
            status: order.status
        })
    }
    Ok(())
}

// Builds a line with the catalog price frozen at this moment
fn snapshot_line(
    conn: &mut DbConnection,
    order_id: Uuid,
    line: &OrderLineInput
) -> Result<NewOrderItem, OrderError>{
    let menu_item = menu_items::table
        .find(line.menu_item_id)
        .select(MenuItem::as_select())
        .first::<MenuItem>(conn)
        .optional()?
        .ok_or(OrderError::NoMenuItemError(line.menu_item_id))?;

    if !menu_item.available {
        return Err(OrderError::MenuItemUnavailable(menu_item.menu_item_id))
    }

    Ok(NewOrderItem{
        order_item_id: Uuid::new_v4(),
        order_id,
        menu_item_id: menu_item.menu_item_id,
        quantity: line.quantity,
        subtotal: checked_line_subtotal(&menu_item.price, line.quantity)?,
        price_at_time: menu_item.price,
        special_instructions: line.special_instructions.clone(),
        created_at: Utc::now()
    })
}

/// Recomputes the order's totals from its current lines and stores them on the
/// order row. Must run in the same transaction as the line mutation, which is
/// rolled back when the new total no longer fits the column.
#[tracing::instrument(
    "Recomputing order totals",
    skip(conn)
)]
pub fn recompute_order_totals(
    conn: &mut DbConnection,
    order_id: Uuid
) -> Result<OrderTotals, OrderError>{
    let lines: Vec<(BigDecimal, i32)> = order_items::table
        .filter(order_items::order_id.eq(order_id))
        .select((order_items::price_at_time, order_items::quantity))
        .load(conn)?;

    let totals = compute_totals(lines.iter().map(|(price, quantity)| (price, *quantity)));
    if !fits_currency_column(&totals.total) {
        return Err(OrderError::AmountOutOfRange)
    }

    diesel::update(orders::table.find(order_id))
        .set((
            orders::subtotal.eq(totals.subtotal.clone()),
            orders::vat.eq(totals.vat.clone()),
            orders::service_fee.eq(totals.service_fee.clone()),
            orders::total.eq(totals.total.clone()),
            orders::updated_at.eq(Utc::now())
        ))
        .execute(conn)?;

    Ok(totals)
}

fn hydrate_orders(
    conn: &mut DbConnection,
    headers: Vec<(Order, Option<String>)>
) -> Result<Vec<OrderWithItems>, DieselError>{
    let order_ids: Vec<Uuid> = headers.iter()
        .map(|(order, _)| order.order_id)
        .collect();

    let rows: Vec<(OrderItem, String, MenuCategory)> = order_items::table
        .inner_join(menu_items::table)
        .filter(order_items::order_id.eq_any(order_ids))
        .order(order_items::position.asc())
        .select((OrderItem::as_select(), menu_items::name, menu_items::category))
        .load(conn)?;

    let mut grouped: HashMap<Uuid, Vec<OrderItemDetail>> = HashMap::new();
    for (item, menu_item_name, menu_item_category) in rows {
        grouped.entry(item.order_id)
            .or_default()
            .push(OrderItemDetail{ item, menu_item_name, menu_item_category });
    }

    Ok(headers.into_iter()
        .map(|(order, waiter_name)| {
            let items = grouped.remove(&order.order_id).unwrap_or_default();
            OrderWithItems{ order, waiter_name, items }
        })
        .collect())
}

fn load_orders(
    conn: &mut DbConnection,
    order_id: Option<Uuid>,
    visibility: OrderVisibility,
    filter: &OrderFilter
) -> Result<Vec<OrderWithItems>, DieselError>{
    let mut query = orders::table
        .left_join(users::table.on(orders::waiter_id.eq(users::user_id.nullable())))
        .select((Order::as_select(), users::name.nullable()))
        .into_boxed();

    if let Some(order_id) = order_id {
        query = query.filter(orders::order_id.eq(order_id));
    }

    if let OrderVisibility::OwnedBy(user_id) = visibility {
        query = query.filter(orders::waiter_id.eq(user_id));
    }

    if let Some(status) = filter.status {
        query = query.filter(orders::status.eq(status));
    }

    let headers = query
        .order(orders::created_at.desc())
        .limit(filter.limit)
        .offset(filter.offset)
        .load::<(Order, Option<String>)>(conn)?;

    hydrate_orders(conn, headers)
}

fn fetch_order(
    conn: &mut DbConnection,
    order_id: Uuid,
    visibility: OrderVisibility
) -> Result<OrderWithItems, OrderError>{
    let filter = OrderFilter{ status: None, limit: 1, offset: 0 };

    load_orders(conn, Some(order_id), visibility, &filter)?
        .pop()
        .ok_or(OrderError::NoOrderIdError(order_id))
}

#[tracing::instrument(
    "Getting orders along with associated order_items",
    skip(conn)
)]
pub async fn get_orders_with_items(
    mut conn: DbConnection,
    visibility: OrderVisibility,
    filter: OrderFilter
) -> Result<Vec<OrderWithItems>, OrderError>{
    let res = spawn_blocking_with_tracing(move || {
        load_orders(&mut conn, None, visibility, &filter)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Getting order with items by id",
    skip(conn)
)]
pub async fn get_order_with_items(
    mut conn: DbConnection,
    order_id: Uuid,
    visibility: OrderVisibility
) -> Result<OrderWithItems, OrderError>{
    spawn_blocking_with_tracing(move || {
        fetch_order(&mut conn, order_id, visibility)
    })
    .await?
}

/// Creates the order header, snapshots every requested line and computes the
/// totals once, all inside one database transaction. A missing or unavailable
/// menu item rolls the whole order back.
#[tracing::instrument(
    "Creating order with its items",
    skip(conn),
    fields(table_number = new_order.table_number, lines = new_order.lines.len())
)]
pub async fn create_order(
    mut conn: DbConnection,
    new_order: NewOrder
) -> Result<OrderWithItems, OrderError>{
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<OrderWithItems, OrderError, _>(|conn| {
            let now = Utc::now();
            let totals = OrderTotals::zero();

            let order = Order{
                order_id: Uuid::new_v4(),
                table_number: new_order.table_number,
                waiter_id: Some(new_order.waiter_id),
                status: OrderStatus::Pending,
                subtotal: totals.subtotal,
                vat: totals.vat,
                service_fee: totals.service_fee,
                total: totals.total,
                notes: new_order.notes,
                created_at: now,
                updated_at: now
            };

            diesel::insert_into(orders::table)
                .values(&order)
                .execute(conn)?;

            for line in new_order.lines.iter() {
                let order_item = snapshot_line(conn, order.order_id, line)?;

                diesel::insert_into(order_items::table)
                    .values(&order_item)
                    .execute(conn)?;
            }

            recompute_order_totals(conn, order.order_id)?;

            fetch_order(conn, order.order_id, OrderVisibility::All)
        })
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Updating order",
    skip(conn, changes)
)]
pub async fn update_order(
    mut conn: DbConnection,
    order_id: Uuid,
    visibility: OrderVisibility,
    mut changes: OrderChanges
) -> Result<OrderWithItems, OrderError>{
    changes.updated_at = Some(Utc::now());

    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<OrderWithItems, OrderError, _>(|conn| {
            let order = lock_order(conn, order_id, visibility)?;
            ensure_mutable(&order)?;

            diesel::update(orders::table.find(order_id))
                .set(&changes)
                .execute(conn)?;

            fetch_order(conn, order_id, OrderVisibility::All)
        })
    })
    .await??;

    Ok(res)
}

// Lines and any transaction are removed with the order
#[tracing::instrument(
    "Deleting order by id",
    skip(conn)
)]
pub async fn delete_order(
    mut conn: DbConnection,
    order_id: Uuid,
    visibility: OrderVisibility
) -> Result<(), OrderError>{
    spawn_blocking_with_tracing(move || {
        conn.transaction::<(), OrderError, _>(|conn| {
            lock_order(conn, order_id, visibility)?;

            diesel::delete(orders::table.find(order_id))
                .execute(conn)?;

            Ok(())
        })
    })
    .await?
}

#[tracing::instrument(
    "Adding item to order",
    skip(conn)
)]
pub async fn add_order_item(
    mut conn: DbConnection,
    order_id: Uuid,
    visibility: OrderVisibility,
    line: OrderLineInput
) -> Result<OrderWithItems, OrderError>{
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<OrderWithItems, OrderError, _>(|conn| {
            let order = lock_order(conn, order_id, visibility)?;
            ensure_mutable(&order)?;

            let order_item = snapshot_line(conn, order_id, &line)?;
            diesel::insert_into(order_items::table)
                .values(&order_item)
                .execute(conn)?;

            recompute_order_totals(conn, order_id)?;

            fetch_order(conn, order_id, OrderVisibility::All)
        })
    })
    .await??;

    Ok(res)
}

// The price snapshot is kept, only quantity and instructions change
#[tracing::instrument(
    "Updating order item",
    skip(conn)
)]
pub async fn update_order_item(
    mut conn: DbConnection,
    order_id: Uuid,
    order_item_id: Uuid,
    visibility: OrderVisibility,
    update: OrderItemUpdate
) -> Result<OrderWithItems, OrderError>{
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<OrderWithItems, OrderError, _>(|conn| {
            let order = lock_order(conn, order_id, visibility)?;
            ensure_mutable(&order)?;

            let item = order_items::table
                .find(order_item_id)
                .filter(order_items::order_id.eq(order_id))
                .select(OrderItem::as_select())
                .first::<OrderItem>(conn)
                .optional()?
                .ok_or(OrderError::NoOrderItemError(order_item_id))?;

            let quantity = update.quantity.unwrap_or(item.quantity);
            let changes = OrderItemChanges{
                quantity: update.quantity,
                subtotal: checked_line_subtotal(&item.price_at_time, quantity)?,
                special_instructions: update.special_instructions
            };

            diesel::update(order_items::table.find(order_item_id))
                .set(&changes)
                .execute(conn)?;

            recompute_order_totals(conn, order_id)?;

            fetch_order(conn, order_id, OrderVisibility::All)
        })
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Removing item from order",
    skip(conn)
)]
pub async fn delete_order_item(
    mut conn: DbConnection,
    order_id: Uuid,
    order_item_id: Uuid,
    visibility: OrderVisibility
) -> Result<OrderWithItems, OrderError>{
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<OrderWithItems, OrderError, _>(|conn| {
            let order = lock_order(conn, order_id, visibility)?;
            ensure_mutable(&order)?;

            let affected_rows = diesel::delete(
                    order_items::table
                        .filter(order_items::order_item_id.eq(order_item_id))
                        .filter(order_items::order_id.eq(order_id))
                )
                .execute(conn)?;

            if affected_rows == 0 {
                return Err(OrderError::NoOrderItemError(order_item_id))
            }

            recompute_order_totals(conn, order_id)?;

            fetch_order(conn, order_id, OrderVisibility::All)
        })
    })
    .await??;

    Ok(res)
}
