use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::AuthenticatedUser,
    db_interaction::menu::toggle_menu_item_availability,
    domain::{money::round_currency, MenuCategory, Permission},
    models::MenuItemChanges,
    routes::{double_option, error::ApiError},
    utils::{get_pooled_connection, DbPool}
};

use super::validate_price;

// Absent fields are left untouched, `image_url: null` clears the image
#[derive(Deserialize, Validate, Debug)]
pub struct MenuItemUpdateForm{
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Option<BigDecimal>,
    pub category: Option<MenuCategory>,
    pub available: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>
}

#[tracing::instrument(
    "Updating menu item",
    skip(pool)
)]
pub async fn update_menu_item(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    form: web::Json<MenuItemUpdateForm>
) -> Result<HttpResponse, ApiError>{
    user.require(Permission::ManageCatalog)?;

    let form = form.into_inner();
    form.validate()?;

    let changes = MenuItemChanges{
        name: form.name.map(|name| name.trim().to_string()),
        description: form.description,
        price: form.price.as_ref().map(round_currency),
        category: form.category,
        available: form.available,
        image_url: form.image_url,
        updated_at: None
    };

    let conn = get_pooled_connection(&pool).await?;
    let updated = crate::db_interaction::menu::update_menu_item(conn, path.into_inner(), changes).await?;

    Ok(HttpResponse::Ok().json(updated))
}

#[tracing::instrument(
    "Toggling menu item availability",
    skip(pool)
)]
pub async fn toggle_availability(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>
) -> Result<HttpResponse, ApiError>{
    user.require(Permission::ManageCatalog)?;

    let conn = get_pooled_connection(&pool).await?;
    let updated = toggle_menu_item_availability(conn, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(updated))
}
