use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{auth::AuthenticatedUser, domain::Permission, routes::error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Deleting user",
    skip(pool)
)]
pub async fn delete_user(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>
) -> Result<HttpResponse, ApiError>{
    user.require(Permission::ManageUsers)?;

    let conn = get_pooled_connection(&pool).await?;
    crate::db_interaction::user::delete_user(conn, path.into_inner(), user.user_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
