use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::AuthenticatedUser,
    db_interaction::menu::insert_menu_item,
    domain::{money::round_currency, MenuCategory, Permission},
    models::MenuItem,
    routes::error::ApiError,
    utils::{get_pooled_connection, DbPool}
};

use super::validate_price;

fn default_available() -> bool{
    true
}

#[derive(Deserialize, Validate, Debug)]
pub struct MenuItemForm{
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(custom(function = "validate_price"))]
    pub price: BigDecimal,
    pub category: MenuCategory,
    #[serde(default = "default_available")]
    pub available: bool,
    #[validate(length(max = 500))]
    pub image_url: Option<String>
}

#[tracing::instrument(
    "Creating menu item",
    skip(pool)
)]
pub async fn create_menu_item(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    form: web::Json<MenuItemForm>
) -> Result<HttpResponse, ApiError>{
    user.require(Permission::ManageCatalog)?;

    let form = form.into_inner();
    form.validate()?;

    let now = Utc::now();
    let menu_item = MenuItem{
        menu_item_id: Uuid::new_v4(),
        name: form.name.trim().to_string(),
        description: form.description,
        price: round_currency(&form.price),
        category: form.category,
        available: form.available,
        image_url: form.image_url,
        created_at: now,
        updated_at: now
    };

    let conn = get_pooled_connection(&pool).await?;
    let created = insert_menu_item(conn, menu_item).await?;

    Ok(HttpResponse::Created().json(created))
}
