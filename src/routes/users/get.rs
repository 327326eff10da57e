use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{auth::AuthenticatedUser, db_interaction::user::get_users, domain::Permission, routes::error::ApiError, utils::{get_pooled_connection, page_bounds, DbPool}};

use super::UserResponse;

#[derive(Deserialize, Debug)]
pub struct UserQuery{
    pub page: Option<i64>,
    pub limit: Option<i64>
}

#[tracing::instrument(
    "Getting list of users",
    skip(pool)
)]
pub async fn list_users(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    query: web::Query<UserQuery>
) -> Result<HttpResponse, ApiError>{
    user.require(Permission::ManageUsers)?;

    let (limit, offset) = page_bounds(query.page, query.limit);
    let conn = get_pooled_connection(&pool).await?;

    let users: Vec<UserResponse> = get_users(conn, limit, offset)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(users))
}

#[tracing::instrument(
    "Getting user",
    skip(pool)
)]
pub async fn get_user(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>
) -> Result<HttpResponse, ApiError>{
    user.require(Permission::ManageUsers)?;

    let conn = get_pooled_connection(&pool).await?;
    let found = crate::db_interaction::user::get_user(conn, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(found)))
}
