use actix_web::{web, HttpResponse};
use anyhow::Context;

use crate::{
    db_interaction::user::{get_user, UserError},
    routes::{error::ApiError, users::UserResponse},
    session_state::TypedSession,
    utils::{get_pooled_connection, DbPool}
};

#[tracing::instrument(
    "Getting current user",
    skip_all
)]
pub async fn me(
    pool: web::Data<DbPool>,
    session: TypedSession
) -> Result<HttpResponse, ApiError>{
    let user_id = session.get_user_id()
        .context("Failed to read user_id from the session")?
        .ok_or(ApiError::NotAuthenticated)?;

    let conn = get_pooled_connection(&pool).await?;
    match get_user(conn, user_id).await {
        Ok(user) => Ok(HttpResponse::Ok().json(UserResponse::from(user))),
        // The account was removed after this session was issued
        Err(UserError::NotFound(_)) => {
            session.purge();
            Err(ApiError::NotAuthenticated)
        },
        Err(e) => Err(e.into())
    }
}
