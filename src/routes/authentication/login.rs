use actix_web::{web, HttpResponse};
use anyhow::Context;
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::json;

use crate::{
    db_interaction::user::get_user_by_username,
    password::verify_password,
    routes::{error::ApiError, users::UserResponse},
    session_state::TypedSession,
    utils::{get_pooled_connection, DbPool}
};

#[derive(Deserialize, Debug)]
pub struct LoginForm{
    pub username: String,
    pub password: SecretString
}

#[tracing::instrument(
    "Logging in user",
    skip(pool, session, form),
    fields(username = %form.username)
)]
pub async fn login(
    pool: web::Data<DbPool>,
    form: web::Json<LoginForm>,
    session: TypedSession
) -> Result<HttpResponse, ApiError>{
    let form = form.into_inner();

    let conn = get_pooled_connection(&pool).await?;
    let user = get_user_by_username(conn, form.username.trim().to_string()).await?;

    let stored_hash = user.as_ref().map(|user| user.password_hash.clone());
    let verified = verify_password(form.password, stored_hash).await?;

    let user = match user {
        Some(user) if verified => user,
        _ => {
            tracing::info!("Username or password did not match");
            return Err(ApiError::InvalidCredentials("Invalid credentials".to_string()))
        }
    };

    session.log_in(user.user_id)
        .context("Failed to store identity in the session")?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "user": UserResponse::from(user)
    })))
}
