use actix_web::{web, HttpResponse};
use secrecy::SecretString;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::AuthenticatedUser,
    domain::{Permission, Role},
    models::UserChanges,
    routes::{double_option, error::ApiError},
    utils::{get_pooled_connection, DbPool}
};

use super::{parse_email, parse_phone_number, post::validate_password, UserResponse};

// `email: null` or `phone_number: null` clears the field
#[derive(Deserialize, Validate, Debug)]
pub struct UpdateUserForm{
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone_number: Option<Option<String>>,
    pub role: Option<Role>,
    pub password: Option<SecretString>
}

#[tracing::instrument(
    "Updating user",
    skip(pool, form)
)]
pub async fn update_user(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    form: web::Json<UpdateUserForm>
) -> Result<HttpResponse, ApiError>{
    user.require(Permission::ManageUsers)?;

    let form = form.into_inner();
    form.validate()?;
    if let Some(password) = &form.password {
        validate_password(password)?;
    }

    let changes = UserChanges{
        name: form.name.map(|name| name.trim().to_string()),
        email: form.email.map(parse_email).transpose()?,
        phone_number: form.phone_number.map(parse_phone_number).transpose()?,
        role: form.role,
        password_hash: None,
        updated_at: None
    };

    let conn = get_pooled_connection(&pool).await?;
    let updated = crate::db_interaction::user::update_user(
        conn,
        path.into_inner(),
        changes,
        form.password
    )
    .await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}
