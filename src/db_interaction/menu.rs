use std::{error::Error, fmt::Debug};

use chrono::Utc;
use diesel::dsl::not;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::{BoolExpressionMethods, ExpressionMethods, OptionalExtension, PgTextExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};
use thiserror::Error;
use uuid::Uuid;

use crate::{domain::MenuCategory, models::{MenuItem, MenuItemChanges}, schema::menu_items, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

#[derive(Debug, Default, Clone)]
pub struct MenuFilter{
    pub category: Option<MenuCategory>,
    pub available: Option<bool>,
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64
}

#[derive(Error)]
pub enum MenuError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    QueryError(#[from] DieselError),
    #[error("menu item {0} doesn't exist")]
    NotFound(Uuid),
    #[error("menu item {0} is referenced by existing orders")]
    InUse(Uuid)
}

impl Debug for MenuError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

// Escapes LIKE wildcards so the search text is matched literally
fn like_pattern(search: &str) -> String{
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[tracing::instrument(
    "Getting menu items from db",
    skip(conn)
)]
pub async fn get_menu_items(
    mut conn: DbConnection,
    filter: MenuFilter
) -> Result<Vec<MenuItem>, MenuError>{
    let res = spawn_blocking_with_tracing(move || {
        let mut query = menu_items::table
            .select(MenuItem::as_select())
            .into_boxed();

        if let Some(category) = filter.category {
            query = query.filter(menu_items::category.eq(category));
        }

        if let Some(available) = filter.available {
            query = query.filter(menu_items::available.eq(available));
        }

        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = like_pattern(search);
            query = query.filter(
                menu_items::name.ilike(pattern.clone())
                    .or(menu_items::description.ilike(pattern))
            );
        }

        query
            .order((menu_items::category.asc(), menu_items::name.asc()))
            .limit(filter.limit)
            .offset(filter.offset)
            .load::<MenuItem>(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Getting menu item by id",
    skip(conn)
)]
pub async fn get_menu_item(
    mut conn: DbConnection,
    menu_item_id: Uuid
) -> Result<MenuItem, MenuError>{
    let res = spawn_blocking_with_tracing(move || {
        menu_items::table
            .find(menu_item_id)
            .select(MenuItem::as_select())
            .first::<MenuItem>(&mut conn)
            .optional()
    })
    .await??;

    res.ok_or(MenuError::NotFound(menu_item_id))
}

#[tracing::instrument(
    "Insert a menu item to db",
    skip_all,
    fields(name = %menu_item.name)
)]
pub async fn insert_menu_item(
    mut conn: DbConnection,
    menu_item: MenuItem
) -> Result<MenuItem, MenuError>{
    let res = spawn_blocking_with_tracing(move || {
        diesel::insert_into(menu_items::table)
            .values(&menu_item)
            .returning(MenuItem::as_returning())
            .get_result::<MenuItem>(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Updating menu item",
    skip(conn, changes)
)]
pub async fn update_menu_item(
    mut conn: DbConnection,
    menu_item_id: Uuid,
    mut changes: MenuItemChanges
) -> Result<MenuItem, MenuError>{
    changes.updated_at = Some(Utc::now());

    let res = spawn_blocking_with_tracing(move || {
        diesel::update(menu_items::table.find(menu_item_id))
            .set(&changes)
            .returning(MenuItem::as_returning())
            .get_result::<MenuItem>(&mut conn)
            .optional()
    })
    .await??;

    res.ok_or(MenuError::NotFound(menu_item_id))
}

#[tracing::instrument(
    "Toggling menu item availability",
    skip(conn)
)]
pub async fn toggle_menu_item_availability(
    mut conn: DbConnection,
    menu_item_id: Uuid
) -> Result<MenuItem, MenuError>{
    let res = spawn_blocking_with_tracing(move || {
        diesel::update(menu_items::table.find(menu_item_id))
            .set((
                menu_items::available.eq(not(menu_items::available)),
                menu_items::updated_at.eq(Utc::now())
            ))
            .returning(MenuItem::as_returning())
            .get_result::<MenuItem>(&mut conn)
            .optional()
    })
    .await??;

    res.ok_or(MenuError::NotFound(menu_item_id))
}

// Items referenced by order lines are protected by the foreign key
#[tracing::instrument(
    "Deleting menu item",
    skip(conn)
)]
pub async fn delete_menu_item(
    mut conn: DbConnection,
    menu_item_id: Uuid
) -> Result<(), MenuError>{
    let affected_rows = spawn_blocking_with_tracing(move || {
        diesel::delete(menu_items::table.find(menu_item_id))
            .execute(&mut conn)
    })
    .await?
    .map_err(|e| match e {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => MenuError::InUse(menu_item_id),
        e => MenuError::QueryError(e)
    })?;

    if affected_rows == 0 {
        return Err(MenuError::NotFound(menu_item_id))
    }

    Ok(())
}
