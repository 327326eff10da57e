use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{auth::AuthenticatedUser, domain::Permission, routes::error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Deleting order",
    skip(pool)
)]
pub async fn delete_order(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>
) -> Result<HttpResponse, ApiError>{
    user.require(Permission::HandleOrders)?;

    let conn = get_pooled_connection(&pool).await?;
    crate::db_interaction::orders::delete_order(conn, path.into_inner(), user.order_visibility()).await?;

    Ok(HttpResponse::NoContent().finish())
}
