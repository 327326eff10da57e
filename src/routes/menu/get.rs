use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    db_interaction::menu::{get_menu_items, MenuFilter},
    domain::MenuCategory,
    routes::error::ApiError,
    utils::{get_pooled_connection, page_bounds, DbPool}
};

#[derive(Deserialize, Debug)]
pub struct MenuQuery{
    pub category: Option<MenuCategory>,
    pub available: Option<bool>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>
}

#[tracing::instrument(
    "Listing menu items",
    skip(pool)
)]
pub async fn list_menu_items(
    pool: web::Data<DbPool>,
    query: web::Query<MenuQuery>
) -> Result<HttpResponse, ApiError>{
    let query = query.into_inner();
    let (limit, offset) = page_bounds(query.page, query.limit);

    let conn = get_pooled_connection(&pool).await?;
    let items = get_menu_items(conn, MenuFilter{
        category: query.category,
        available: query.available,
        search: query.search,
        limit,
        offset
    })
    .await?;

    Ok(HttpResponse::Ok().json(items))
}

#[tracing::instrument(
    "Getting menu item",
    skip(pool)
)]
pub async fn get_menu_item(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>
) -> Result<HttpResponse, ApiError>{
    let conn = get_pooled_connection(&pool).await?;
    let item = crate::db_interaction::menu::get_menu_item(conn, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(item))
}
