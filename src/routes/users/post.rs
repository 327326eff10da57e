use actix_web::{web, HttpResponse};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use validator::Validate;

use crate::{
    auth::AuthenticatedUser,
    db_interaction::user::{insert_user, NewUser},
    domain::{Permission, Role},
    routes::error::ApiError,
    utils::{get_pooled_connection, DbPool}
};

use super::{parse_email, parse_phone_number, UserResponse};

// Checked by hand since the secret wrapper cannot go through the Validate derive
pub(super) fn validate_password(password: &SecretString) -> Result<(), ApiError>{
    let length = password.expose_secret().chars().count();
    if !(8..=128).contains(&length) {
        return Err(ApiError::Validation("password must be between 8 and 128 characters".to_string()))
    }
    Ok(())
}

#[derive(Deserialize, Validate, Debug)]
pub struct CreateUserForm{
    #[validate(length(min = 3, max = 150))]
    pub username: String,
    pub password: SecretString,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub role: Option<Role>
}

#[tracing::instrument(
    "Creating user",
    skip(pool, form),
    fields(username = %form.username)
)]
pub async fn create_user(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    form: web::Json<CreateUserForm>
) -> Result<HttpResponse, ApiError>{
    user.require(Permission::ManageUsers)?;

    let form = form.into_inner();
    form.validate()?;
    validate_password(&form.password)?;

    let new_user = NewUser{
        username: form.username.trim().to_string(),
        password: form.password,
        name: form.name.trim().to_string(),
        email: parse_email(form.email)?,
        phone_number: parse_phone_number(form.phone_number)?,
        role: form.role.unwrap_or(Role::Waiter)
    };

    let conn = get_pooled_connection(&pool).await?;
    let created = insert_user(conn, new_user).await?;

    Ok(HttpResponse::Created().json(UserResponse::from(created)))
}
