use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{auth::AuthenticatedUser, domain::Permission, routes::error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Deleting menu item",
    skip(pool)
)]
pub async fn delete_menu_item(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>
) -> Result<HttpResponse, ApiError>{
    user.require(Permission::ManageCatalog)?;

    let conn = get_pooled_connection(&pool).await?;
    crate::db_interaction::menu::delete_menu_item(conn, path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
